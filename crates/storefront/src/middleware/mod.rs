//! HTTP middleware and extractors for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (reuse or mint `x-request-id`)
//!
//! Admin routes additionally use the [`RequireAdmin`] extractor.

pub mod admin;
pub mod request_id;

pub use admin::{AdminRejection, RequireAdmin};
pub use request_id::{REQUEST_ID_HEADER, make_request_span, request_id_middleware};
