//! HTTP middleware stack for the catalog server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS (any origin)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
