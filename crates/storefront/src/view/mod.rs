//! Page state for one shopper.
//!
//! [`ShopPage`] owns the cart store together with the views derived from it
//! (product grid, cart panel, confirmation overlay). Every cart mutation goes
//! through it, so the views are always resynchronized after a change, and each
//! operation reports the [`Refresh`] the browser needs to re-render.
//!
//! The page is rebuilt from the session on every request and written back
//! afterwards; nothing here performs I/O.

pub mod cart_panel;
pub mod confirmation;
pub mod grid;

use std::sync::Arc;

use dessert_shop_core::{CartStore, Catalog, OrderError, ProductName};
use thiserror::Error;

use crate::models::ShopSession;

pub use cart_panel::CartPanel;
pub use confirmation::ConfirmationSurface;
pub use grid::{ProductCard, ProductGrid};

/// Errors from page operations.
#[derive(Debug, Error)]
pub enum PageError {
    /// The requested product is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductName),
}

/// Page regions to re-render after an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refresh {
    /// Cart panel, total and item-count badge.
    pub cart: bool,
    /// Product cards whose button state changed.
    pub cards: Vec<ProductName>,
    /// Confirmation overlay.
    pub confirmation: bool,
}

impl Refresh {
    /// Nothing changed.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    fn product(name: ProductName) -> Self {
        Self {
            cart: true,
            cards: vec![name],
            confirmation: false,
        }
    }

    fn confirmation() -> Self {
        Self {
            confirmation: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.cart && self.cards.is_empty() && !self.confirmation
    }
}

/// Cart store plus derived views for one session.
#[derive(Debug, Clone)]
pub struct ShopPage {
    catalog: Arc<Catalog>,
    cart: CartStore,
    grid: ProductGrid,
    panel: CartPanel,
    confirmation: ConfirmationSurface,
}

impl ShopPage {
    /// Rebuild the page from stored session state.
    ///
    /// `grid` is the catalog's freshly rendered grid; it is synchronized with
    /// the restored cart here.
    #[must_use]
    pub fn restore(catalog: Arc<Catalog>, grid: ProductGrid, stored: ShopSession) -> Self {
        let (cart, unknown) = CartStore::restore(&catalog, &stored.cart);
        if !unknown.is_empty() {
            tracing::warn!(
                ?unknown,
                "Dropped cart lines for products missing from the catalog"
            );
        }

        let mut page = Self {
            catalog,
            cart,
            grid,
            panel: CartPanel::default(),
            confirmation: stored.confirmation,
        };
        page.resync_all();
        page
    }

    /// State to store in the session.
    #[must_use]
    pub fn to_session(&self) -> ShopSession {
        ShopSession {
            cart: self.cart.product_names(),
            confirmation: self.confirmation.clone(),
        }
    }

    /// Add one unit of `name`.
    ///
    /// # Errors
    ///
    /// Returns `PageError::UnknownProduct` if `name` is not in the catalog.
    pub fn add_unit(&mut self, name: &str) -> Result<Refresh, PageError> {
        let product = self
            .catalog
            .get(name)
            .cloned()
            .ok_or_else(|| PageError::UnknownProduct(ProductName::from(name)))?;
        let name = product.name.clone();

        self.cart.add_unit(product);
        Ok(self.resync_product(name))
    }

    /// Remove one unit of `name`; a no-op when none is in the cart.
    pub fn remove_unit(&mut self, name: &str) -> Refresh {
        if self.cart.remove_unit(name) {
            self.resync_product(ProductName::from(name))
        } else {
            Refresh::none()
        }
    }

    /// Remove every unit of `name`; a no-op when none is in the cart.
    pub fn remove_all_units(&mut self, name: &str) -> Refresh {
        if self.cart.remove_all_units(name) > 0 {
            self.resync_product(ProductName::from(name))
        } else {
            Refresh::none()
        }
    }

    /// Open the confirmation overlay with a snapshot of the cart.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` and changes nothing when the cart is
    /// empty.
    pub fn show_confirmation(&mut self) -> Result<Refresh, OrderError> {
        self.confirmation.show(&self.cart)?;
        Ok(Refresh::confirmation())
    }

    pub fn hide_confirmation(&mut self) -> Refresh {
        self.confirmation.hide();
        Refresh::confirmation()
    }

    /// Close the overlay, empty the cart and reset every product card.
    pub fn start_new_order(&mut self) -> Refresh {
        self.confirmation.hide();
        self.cart.clear();
        self.resync_all();

        Refresh {
            cart: true,
            cards: self.grid.names(),
            confirmation: true,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub const fn grid(&self) -> &ProductGrid {
        &self.grid
    }

    #[must_use]
    pub const fn panel(&self) -> &CartPanel {
        &self.panel
    }

    #[must_use]
    pub const fn confirmation(&self) -> &ConfirmationSurface {
        &self.confirmation
    }

    fn resync_product(&mut self, name: ProductName) -> Refresh {
        self.panel.refresh(self.cart.lines());
        let quantity = self.cart.quantity_of(name.as_str());
        self.grid.sync_button(name.as_str(), quantity);
        Refresh::product(name)
    }

    fn resync_all(&mut self) {
        self.panel.refresh(self.cart.lines());
        self.grid.sync_all(&self.cart);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use dessert_shop_core::{Product, ProductImage};
    use rust_decimal::Decimal;

    use super::*;

    fn product(name: &str, cents: i64) -> Product {
        Product {
            name: ProductName::from(name),
            category: "Dessert".to_string(),
            price: Decimal::new(cents, 2),
            image: ProductImage {
                thumbnail: format!("/static/images/{name}-thumbnail.jpg"),
                mobile: None,
                tablet: None,
                desktop: format!("/static/images/{name}-desktop.jpg"),
            },
        }
    }

    /// Product A at $5.00 and product B at $3.50.
    pub(crate) fn catalog() -> Catalog {
        Catalog::new(vec![product("A", 500), product("B", 350)]).unwrap()
    }

    fn page() -> ShopPage {
        let catalog = Arc::new(catalog());
        let grid = ProductGrid::render(catalog.products());
        ShopPage::restore(catalog, grid, ShopSession::default())
    }

    fn two_a_one_b() -> ShopPage {
        let mut page = page();
        page.add_unit("A").unwrap();
        page.add_unit("A").unwrap();
        page.add_unit("B").unwrap();
        page
    }

    #[test]
    fn test_add_refreshes_cart_and_card() {
        let mut page = page();
        let refresh = page.add_unit("A").unwrap();

        assert!(refresh.cart);
        assert_eq!(refresh.cards, vec![ProductName::from("A")]);
        assert!(!refresh.confirmation);
        assert_eq!(page.panel().item_count(), 1);
        assert!(page.grid().card("A").unwrap().stepper_visible);
    }

    #[test]
    fn test_add_unknown_product() {
        let mut page = page();
        let err = page.add_unit("Z").unwrap_err();
        assert!(matches!(err, PageError::UnknownProduct(name) if name.as_str() == "Z"));
        assert!(page.cart().is_empty());
    }

    #[test]
    fn test_scenario_two_a_one_b() {
        let page = two_a_one_b();

        assert_eq!(page.panel().total().to_string(), "$13.50");
        assert_eq!(page.panel().item_count(), 3);
        assert_eq!(page.grid().card("A").unwrap().quantity, 2);
        assert_eq!(page.grid().card("B").unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_line_reverts_card() {
        let mut page = two_a_one_b();
        let refresh = page.remove_all_units("B");

        assert_eq!(refresh.cards, vec![ProductName::from("B")]);
        assert_eq!(page.panel().items().len(), 1);
        assert_eq!(page.panel().total().to_string(), "$10.00");
        let card = page.grid().card("B").unwrap();
        assert!(card.add_visible);
        assert!(!card.stepper_visible);
    }

    #[test]
    fn test_decrement_to_zero() {
        let mut page = page();
        page.add_unit("B").unwrap();
        page.remove_unit("B");

        assert!(page.panel().empty_visible());
        assert!(page.grid().card("B").unwrap().add_visible);
    }

    #[test]
    fn test_noop_removals_report_nothing() {
        let mut page = page();
        assert!(page.remove_unit("A").is_empty());
        assert!(page.remove_all_units("A").is_empty());
        assert!(page.remove_unit("Z").is_empty());
    }

    #[test]
    fn test_confirm_empty_cart() {
        let mut page = page();
        let err = page.show_confirmation().unwrap_err();

        assert_eq!(err, OrderError::EmptyCart);
        assert!(!page.confirmation().is_visible());
        assert!(page.confirmation().snapshot().is_none());
    }

    #[test]
    fn test_confirm_then_start_new_order() {
        let mut page = two_a_one_b();
        let refresh = page.show_confirmation().unwrap();
        assert_eq!(refresh, Refresh::confirmation());

        let snapshot = page.confirmation().snapshot().unwrap();
        assert_eq!(snapshot.items().len(), 2);
        assert_eq!(snapshot.total().to_string(), "$13.50");

        let refresh = page.start_new_order();
        assert!(refresh.cart && refresh.confirmation);
        assert_eq!(refresh.cards.len(), 2);
        assert!(!page.confirmation().is_visible());
        assert!(page.cart().is_empty());
        for card in page.grid().cards() {
            assert!(card.add_visible);
            assert_eq!(card.quantity, 0);
        }
    }

    #[test]
    fn test_session_round_trip() {
        let mut page = two_a_one_b();
        page.show_confirmation().unwrap();
        let stored = page.to_session();

        let catalog = Arc::new(catalog());
        let grid = ProductGrid::render(catalog.products());
        let restored = ShopPage::restore(catalog, grid, stored);

        assert_eq!(restored.cart(), page.cart());
        assert_eq!(restored.grid().card("A").unwrap().quantity, 2);
        assert_eq!(restored.panel().total().to_string(), "$13.50");
        assert!(restored.confirmation().is_visible());
    }
}
