//! Shop page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use super::load_page;
use crate::error::Result;
use crate::state::AppState;
use crate::view::{CartPanel, ConfirmationSurface, ProductGrid};

/// Full shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub oob: bool,
    /// Shown instead of the grid when the catalog failed to load.
    pub catalog_error: Option<String>,
    pub grid: ProductGrid,
    pub panel: CartPanel,
    pub confirmation: ConfirmationSurface,
}

/// Display the shop page.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<IndexTemplate> {
    let page = load_page(&state, &session).await?;

    Ok(IndexTemplate {
        oob: false,
        catalog_error: state.catalog_error().map(str::to_owned),
        grid: page.grid().clone(),
        panel: page.panel().clone(),
        confirmation: page.confirmation().clone(),
    })
}
