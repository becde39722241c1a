//! Per-session request serialization.
//!
//! Every handler restores the shopper's page, applies one operation and stores
//! it again, and the session layer writes the record back only after the
//! handler returns. Requests carrying the same session cookie therefore run
//! one at a time, from before the session is loaded until after it is saved.
//! Requests without a session cookie have no shared state and are not queued.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tower_sessions::cookie::Cookie;

use super::session::SESSION_COOKIE_NAME;
use crate::state::AppState;

/// One async lock per live session cookie.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SessionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `next` while holding the lock for `key`.
    async fn serialize(&self, key: String, request: Request, next: Next) -> Response {
        let lock = Arc::clone(self.locks.entry(key.clone()).or_default().value());

        let response = {
            let _guard = lock.lock().await;
            next.run(request).await
        };

        drop(lock);
        // Only the map still holds the lock when no request is waiting on it
        self.locks
            .remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);

        response
    }

    /// Number of sessions with a request in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Middleware that queues requests sharing a session cookie.
pub async fn session_lock_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match session_cookie(&request) {
        Some(key) => state.session_locks().serialize(key, request, next).await,
        None => next.run(request).await,
    }
}

/// Value of the session cookie, if the request carries one.
fn session_cookie(request: &Request) -> Option<String> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with_cookie(cookie: &str) -> Request {
        Request::get("/")
            .header(COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_session_cookie_found_among_others() {
        let request = request_with_cookie("theme=dark; dessert_session=abc123; lang=en");
        assert_eq!(session_cookie(&request).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_cookie_missing() {
        let request = request_with_cookie("theme=dark");
        assert!(session_cookie(&request).is_none());

        let request = Request::get("/").body(Body::empty()).unwrap();
        assert!(session_cookie(&request).is_none());
    }

    #[test]
    fn test_new_locks_are_empty() {
        let locks = SessionLocks::new();
        assert!(locks.is_empty());
        assert_eq!(locks.len(), 0);
    }
}
