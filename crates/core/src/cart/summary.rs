//! Grouped cart summaries and order snapshots.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, Product};

use super::store::{CartLine, CartStore};

/// Errors raised when finalizing an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Confirmation was requested with nothing in the cart.
    #[error("Your cart is empty. Please add some products before confirming your order.")]
    EmptyCart,
}

/// All cart lines of one product, aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedCartItem {
    pub product: Product,
    pub quantity: usize,
    pub unit_price: Price,
    pub subtotal: Price,
}

/// Group lines by product name.
///
/// Groups appear in the order their product was first added.
#[must_use]
pub fn group_lines(lines: &[CartLine]) -> Vec<GroupedCartItem> {
    let mut groups: Vec<(&Arc<Product>, usize)> = Vec::new();

    for line in lines {
        match groups
            .iter_mut()
            .find(|(product, _)| product.name == *line.name())
        {
            Some((_, quantity)) => *quantity += 1,
            None => groups.push((line.product(), 1)),
        }
    }

    groups
        .into_iter()
        .map(|(product, quantity)| {
            let unit_price = product.unit_price();
            GroupedCartItem {
                product: Product::clone(product),
                quantity,
                unit_price,
                subtotal: unit_price * quantity,
            }
        })
        .collect()
}

/// Grouped items plus the totals shown alongside them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub items: Vec<GroupedCartItem>,
    /// Sum of item subtotals.
    pub total: Price,
    /// Number of units, i.e. cart lines.
    pub item_count: usize,
}

impl CartSummary {
    #[must_use]
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let items = group_lines(lines);
        let total = items.iter().map(|item| item.subtotal).sum();

        Self {
            items,
            total,
            item_count: lines.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

/// A cart summary frozen at the moment an order was confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    summary: CartSummary,
}

impl CartSnapshot {
    /// Capture the current cart.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` if the cart has no lines.
    pub fn capture(cart: &CartStore) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        Ok(Self {
            summary: cart.summary(),
        })
    }

    #[must_use]
    pub fn items(&self) -> &[GroupedCartItem] {
        &self.summary.items
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.summary.total
    }

    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.summary.item_count
    }
}
