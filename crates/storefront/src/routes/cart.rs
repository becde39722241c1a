//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Each mutation answers with out-of-band fragments for the cart panel and
//! the affected product cards.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Response};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use dessert_shop_core::ProductName;

use super::{load_page, refresh_response, save_page};
use crate::error::Result;
use crate::state::AppState;
use crate::view::{CartPanel, ConfirmationSurface, ProductCard, Refresh, ShopPage};

/// Form data naming a product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: ProductName,
}

/// Out-of-band refresh fragments (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/refresh.html")]
pub struct RefreshTemplate {
    pub oob: bool,
    pub panel: Option<CartPanel>,
    pub cards: Vec<ProductCard>,
    pub confirmation: Option<ConfirmationSurface>,
}

impl RefreshTemplate {
    /// Collect the regions named by `refresh` from the page.
    #[must_use]
    pub fn new(page: &ShopPage, refresh: &Refresh) -> Self {
        Self {
            oob: true,
            panel: refresh.cart.then(|| page.panel().clone()),
            cards: refresh
                .cards
                .iter()
                .filter_map(|name| page.grid().card(name.as_str()).cloned())
                .collect(),
            confirmation: refresh
                .confirmation
                .then(|| page.confirmation().clone()),
        }
    }
}

/// Add one unit to the cart (HTMX).
///
/// Used by both the add button and the stepper increment.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let mut page = load_page(&state, &session).await?;
    let refresh = page.add_unit(form.name.as_str())?;
    save_page(&session, &page).await?;

    tracing::debug!(
        product = %form.name,
        quantity = page.cart().quantity_of(form.name.as_str()),
        "Added unit to cart"
    );

    Ok(refresh_response(&page, &refresh))
}

/// Remove one unit from the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn decrement(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let mut page = load_page(&state, &session).await?;
    let refresh = page.remove_unit(form.name.as_str());
    if !refresh.is_empty() {
        save_page(&session, &page).await?;
    }

    Ok(refresh_response(&page, &refresh))
}

/// Remove every unit of a product from the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let mut page = load_page(&state, &session).await?;
    let refresh = page.remove_all_units(form.name.as_str());
    if !refresh.is_empty() {
        save_page(&session, &page).await?;
    }

    Ok(refresh_response(&page, &refresh))
}
