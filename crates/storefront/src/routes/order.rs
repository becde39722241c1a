//! Order confirmation route handlers.

use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use dessert_shop_core::OrderError;

use super::{load_page, refresh_response, save_page};
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Client-side event raised when confirmation is requested on an empty cart.
///
/// The page script shows the event's message as a blocking alert.
pub const EMPTY_CART_EVENT: &str = "cart-empty";

/// Open the confirmation overlay (HTMX).
///
/// With an empty cart nothing is rendered or stored; the response only
/// carries the `HX-Trigger` notification.
#[instrument(skip(state, session))]
pub async fn confirm(State(state): State<AppState>, session: Session) -> Result<Response> {
    let mut page = load_page(&state, &session).await?;

    let refresh = match page.show_confirmation() {
        Ok(refresh) => refresh,
        Err(err) => {
            tracing::info!("Order confirmation requested with an empty cart");
            return Ok(notify(EMPTY_CART_EVENT, &err));
        }
    };
    save_page(&session, &page).await?;

    if let Some(snapshot) = page.confirmation().snapshot() {
        let items = snapshot.item_count().to_string();
        let total = snapshot.total().to_string();
        add_breadcrumb(
            "order",
            "Order confirmed",
            Some(&[("items", items.as_str()), ("total", total.as_str())]),
        );
        tracing::info!(items = %items, total = %total, "Order confirmed");
    }

    Ok(refresh_response(&page, &refresh))
}

/// Close the confirmation overlay (HTMX).
#[instrument(skip(state, session))]
pub async fn dismiss(State(state): State<AppState>, session: Session) -> Result<Response> {
    let mut page = load_page(&state, &session).await?;
    let refresh = page.hide_confirmation();
    save_page(&session, &page).await?;

    Ok(refresh_response(&page, &refresh))
}

/// Close the overlay and reset the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn start_new(State(state): State<AppState>, session: Session) -> Result<Response> {
    let mut page = load_page(&state, &session).await?;
    let refresh = page.start_new_order();
    save_page(&session, &page).await?;

    tracing::debug!("Started new order");
    Ok(refresh_response(&page, &refresh))
}

/// Empty response that raises a client-side notification event.
fn notify(event: &str, err: &OrderError) -> Response {
    let mut detail = serde_json::Map::new();
    detail.insert(
        event.to_string(),
        serde_json::Value::String(err.to_string()),
    );
    let trigger = serde_json::Value::Object(detail).to_string();

    (
        AppendHeaders([
            ("HX-Trigger", trigger),
            ("HX-Reswap", "none".to_string()),
        ]),
        (),
    )
        .into_response()
}
