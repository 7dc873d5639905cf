//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, per-request hub)
//! 2. Request ID (add unique ID to each request and response)
//! 3. `TraceLayer` (request span carrying the request ID)
//! 4. Timeout (abandon requests past the configured deadline)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestId, make_request_span, request_id_middleware};
