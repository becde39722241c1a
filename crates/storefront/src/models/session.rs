//! Session-related types.
//!
//! Per-shopper state stored between requests.

use serde::{Deserialize, Serialize};

use dessert_shop_core::ProductName;

use crate::view::ConfirmationSurface;

/// Session-stored shop state.
///
/// The cart is kept as its ordered product names; products are resolved
/// against the catalog when the page is restored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopSession {
    pub cart: Vec<ProductName>,
    #[serde(default)]
    pub confirmation: ConfirmationSurface,
}

/// Session keys.
pub mod keys {
    /// Key for the shopper's cart and confirmation state.
    pub const SHOP: &str = "shop";
}
