//! Product grid and per-product button state.

use std::collections::HashMap;
use std::sync::Arc;

use dessert_shop_core::{CartStore, Product, ProductName};

/// Display state of one product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub product: Arc<Product>,
    /// Element id, stable for the lifetime of the catalog.
    pub dom_id: String,
    pub quantity: usize,
    pub add_visible: bool,
    pub stepper_visible: bool,
    /// Whether the image carries the "selected" highlight.
    pub selected: bool,
}

impl ProductCard {
    fn new(product: Arc<Product>, position: usize) -> Self {
        Self {
            product,
            dom_id: format!("product-{position}"),
            quantity: 0,
            add_visible: true,
            stepper_visible: false,
            selected: false,
        }
    }

    fn show_quantity(&mut self, quantity: usize) {
        let in_cart = quantity > 0;
        self.quantity = quantity;
        self.add_visible = !in_cart;
        self.stepper_visible = in_cart;
        self.selected = in_cart;
    }
}

/// One card per catalog product, addressable by product name.
#[derive(Debug, Clone, Default)]
pub struct ProductGrid {
    cards: Vec<ProductCard>,
    handles: HashMap<ProductName, usize>,
}

impl ProductGrid {
    /// Build the grid for a catalog.
    ///
    /// Every card starts with the add control visible and the stepper hidden.
    #[must_use]
    pub fn render(products: &[Arc<Product>]) -> Self {
        let cards: Vec<ProductCard> = products
            .iter()
            .enumerate()
            .map(|(position, product)| ProductCard::new(Arc::clone(product), position))
            .collect();
        let handles = cards
            .iter()
            .enumerate()
            .map(|(position, card)| (card.product.name.clone(), position))
            .collect();

        Self { cards, handles }
    }

    #[must_use]
    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, name: &str) -> Option<&ProductCard> {
        self.handles
            .get(name)
            .and_then(|&position| self.cards.get(position))
    }

    /// Reflect `quantity` onto the card for `name`.
    ///
    /// Names without a card are ignored.
    pub fn sync_button(&mut self, name: &str, quantity: usize) -> Option<&ProductCard> {
        let position = *self.handles.get(name)?;
        let card = self.cards.get_mut(position)?;
        card.show_quantity(quantity);
        Some(card)
    }

    /// Reflect the cart onto every card.
    pub fn sync_all(&mut self, cart: &CartStore) {
        for card in &mut self.cards {
            let quantity = cart.quantity_of(card.product.name.as_str());
            card.show_quantity(quantity);
        }
    }

    /// Names of every card in display order.
    #[must_use]
    pub fn names(&self) -> Vec<ProductName> {
        self.cards
            .iter()
            .map(|card| card.product.name.clone())
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
