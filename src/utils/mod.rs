//! Utility functions for code generation, URL processing, and request handling.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_normalizer`] - URL validation and scheme repair
//! - [`request_origin`] - Request origin extraction from HTTP headers

pub mod code_generator;
pub mod request_origin;
pub mod url_normalizer;
