//! Dessert Shop Core - catalog and cart domain library.
//!
//! This crate provides the types and pure state logic used by the storefront:
//! - [`types`] - Newtype wrappers for product names, prices and product records
//! - [`catalog`] - The immutable product catalog with a name index
//! - [`cart`] - The cart store, the shared grouping routine and order snapshots
//!
//! # Architecture
//!
//! The core crate contains only types and state transitions - no I/O, no HTTP,
//! no rendering. The storefront binds these to sessions and templates, which
//! keeps every cart rule testable without a rendering surface.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{CartLine, CartSnapshot, CartStore, CartSummary, GroupedCartItem, OrderError, group_lines};
pub use catalog::{Catalog, CatalogError};
pub use types::*;
