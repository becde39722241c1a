//! Order confirmation overlay.

use dessert_shop_core::{CartSnapshot, CartStore, OrderError};
use serde::{Deserialize, Serialize};

/// The confirmation overlay and the snapshot it displays.
///
/// The snapshot is only replaced by a new successful [`show`](Self::show);
/// hiding the overlay or mutating the cart leaves it as captured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationSurface {
    snapshot: Option<CartSnapshot>,
    visible: bool,
}

impl ConfirmationSurface {
    /// Snapshot the cart and make the overlay visible.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` without touching the overlay when the
    /// cart is empty.
    pub fn show(&mut self, cart: &CartStore) -> Result<&CartSnapshot, OrderError> {
        let snapshot = CartSnapshot::capture(cart)?;
        self.visible = true;
        Ok(self.snapshot.insert(snapshot))
    }

    pub const fn hide(&mut self) {
        self.visible = false;
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub const fn snapshot(&self) -> Option<&CartSnapshot> {
        self.snapshot.as_ref()
    }
}
