//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Shop page (product grid, cart, confirmation overlay)
//! GET  /health           - Health check
//!
//! # Cart (HTMX out-of-band fragments)
//! POST /cart/add         - Add one unit (add button and stepper increment)
//! POST /cart/decrement   - Remove one unit (stepper decrement)
//! POST /cart/remove      - Remove every unit of a product (cart line remove)
//!
//! # Order (HTMX out-of-band fragments)
//! POST /order/confirm    - Open the confirmation overlay, or notify empty cart
//! POST /order/dismiss    - Close the overlay (backdrop click)
//! POST /order/new        - Close the overlay and start over with an empty cart
//! ```
//!
//! Every handler restores the shopper's [`ShopPage`] from the session, applies
//! exactly one operation, and stores the result before rendering.

pub mod cart;
pub mod home;
pub mod order;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_sessions::Session;

use crate::error::Result;
use crate::models::{ShopSession, session_keys};
use crate::state::AppState;
use crate::view::{Refresh, ShopPage};

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/decrement", post(cart::decrement))
        .route("/remove", post(cart::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/confirm", post(order::confirm))
        .route("/dismiss", post(order::dismiss))
        .route("/new", post(order::start_new))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health))
        .nest("/cart", cart_routes())
        .nest("/order", order_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Restore the shopper's page from the session.
async fn load_page(state: &AppState, session: &Session) -> Result<ShopPage> {
    let stored = session
        .get::<ShopSession>(session_keys::SHOP)
        .await?
        .unwrap_or_default();

    Ok(ShopPage::restore(
        state.catalog(),
        state.grid().clone(),
        stored,
    ))
}

/// Store the shopper's page in the session.
async fn save_page(session: &Session, page: &ShopPage) -> Result<()> {
    session.insert(session_keys::SHOP, page.to_session()).await?;
    Ok(())
}

/// Render the fragments named by `refresh`, or `204` when nothing changed.
fn refresh_response(page: &ShopPage, refresh: &Refresh) -> Response {
    if refresh.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    cart::RefreshTemplate::new(page, refresh).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::LoadedCatalog;

    fn app() -> Router {
        let loaded = LoadedCatalog::loaded(crate::view::tests::catalog());
        crate::app(AppState::new(crate::config::tests::config(), loaded))
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_post(uri: &str, name: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("name={name}")))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_index_renders_every_card() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(r#"id="product-0""#));
        assert!(body.contains(r#"id="product-1""#));
        assert!(body.contains(r#"id="confirm-order-modal""#));
    }

    #[tokio::test]
    async fn test_add_sets_session_cookie() {
        let response = app().oneshot(form_post("/cart/add", "A")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(cookie.to_str().unwrap().starts_with("dessert_session="));
        assert!(body_text(response).await.contains(r#"hx-swap-oob="true""#));
    }

    #[tokio::test]
    async fn test_noop_decrement_is_no_content() {
        let response = app()
            .oneshot(form_post("/cart/decrement", "A"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-request-id"));
    }
}
