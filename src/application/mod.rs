//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations by coordinating repository calls,
//! normalization and code generation, and give HTTP handlers a small API.
//!
//! - [`services::link_service::LinkService`] - Short link creation, resolution and listing

pub mod services;
