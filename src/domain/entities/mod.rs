//! Core domain entities.
//!
//! - [`Link`] - A stored short link
//! - [`NewLink`] - Input for creating a link
//! - [`ShortLink`] - A link with its public short URL attached

pub mod link;

pub use link::{Link, NewLink, ShortLink, short_url};
