//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded on the request span)
//! 4. Session lock (one request at a time per session cookie)
//! 5. Session layer (tower-sessions with in-memory store)

pub mod request_id;
pub mod session;
pub mod session_lock;

pub use request_id::request_id_middleware;
pub use session::create_session_layer;
pub use session_lock::{SessionLocks, session_lock_middleware};
