//! Middleware and request extractors for the borrowings API
//!
//! This module provides middleware for request tracing and security headers,
//! and the validated JSON body extractor.

mod security;
mod tracing;
mod validation;

pub use security::{hsts_header, security_headers};
pub use tracing::request_tracing;
pub use validation::ValidatedJson;
