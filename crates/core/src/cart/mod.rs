//! Cart state and the derived summaries.
//!
//! - [`CartStore`] owns the ordered sequence of [`CartLine`]s, one per unit
//! - [`group_lines`] is the single aggregation routine shared by the cart
//!   panel and the order confirmation
//! - [`CartSnapshot`] freezes a summary at confirmation time

mod store;
mod summary;

pub use store::{CartLine, CartStore};
pub use summary::{CartSnapshot, CartSummary, GroupedCartItem, OrderError, group_lines};
