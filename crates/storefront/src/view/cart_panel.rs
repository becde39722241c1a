//! Cart summary panel.

use dessert_shop_core::{CartLine, CartSummary, GroupedCartItem, Price};

/// Grouped cart contents, total and item-count badge.
#[derive(Debug, Clone, Default)]
pub struct CartPanel {
    summary: CartSummary,
}

impl CartPanel {
    /// Recompute the panel from scratch.
    pub fn refresh(&mut self, lines: &[CartLine]) {
        self.summary = CartSummary::from_lines(lines);
    }

    #[must_use]
    pub fn items(&self) -> &[GroupedCartItem] {
        &self.summary.items
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.summary.total
    }

    /// Value of the item-count badge.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.summary.item_count
    }

    /// Whether the empty-state placeholder is shown.
    #[must_use]
    pub const fn empty_visible(&self) -> bool {
        self.summary.is_empty()
    }

    /// Whether the itemized content region is shown.
    #[must_use]
    pub const fn content_visible(&self) -> bool {
        !self.summary.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use dessert_shop_core::CartStore;

    use super::*;
    use crate::view::tests::catalog;

    #[test]
    fn test_empty_panel_shows_placeholder() {
        let mut panel = CartPanel::default();
        panel.refresh(&[]);

        assert!(panel.empty_visible());
        assert!(!panel.content_visible());
        assert_eq!(panel.item_count(), 0);
        assert_eq!(panel.total().to_string(), "$0.00");
    }

    #[test]
    fn test_panel_lists_groups_in_first_seen_order() {
        let catalog = catalog();
        let mut cart = CartStore::new();
        for name in ["A", "B", "A"] {
            cart.add_unit(Arc::clone(catalog.get(name).unwrap()));
        }

        let mut panel = CartPanel::default();
        panel.refresh(cart.lines());

        assert!(panel.content_visible());
        assert!(!panel.empty_visible());
        let rows: Vec<String> = panel
            .items()
            .iter()
            .map(|item| {
                format!(
                    "{} {}x @ {} = {}",
                    item.product.name, item.quantity, item.unit_price, item.subtotal
                )
            })
            .collect();
        assert_eq!(rows, ["A 2x @ $5.00 = $10.00", "B 1x @ $3.50 = $3.50"]);
        assert_eq!(panel.total().to_string(), "$13.50");
        assert_eq!(panel.item_count(), 3);
    }
}
