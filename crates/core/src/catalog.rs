//! The product catalog.
//!
//! A [`Catalog`] is built once per load and never mutated afterwards. Products
//! are shared as `Arc<Product>` so cart lines and view cards can reference
//! them without copying.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{Product, ProductName};

/// Errors that make a catalog unusable.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog document is not a valid product list.
    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records share the same name.
    #[error("Duplicate product name: {0}")]
    DuplicateName(ProductName),

    /// A record has a price below zero.
    #[error("Negative price for product: {0}")]
    NegativePrice(ProductName),
}

/// Ordered list of products with a name index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    positions: HashMap<ProductName, usize>,
}

impl Catalog {
    /// Build a catalog, preserving record order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a name repeats or a price is negative.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut positions = HashMap::with_capacity(products.len());

        for (position, product) in products.iter().enumerate() {
            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(product.name.clone()));
            }
            if positions.insert(product.name.clone(), position).is_some() {
                return Err(CatalogError::DuplicateName(product.name.clone()));
            }
        }

        Ok(Self {
            products: products.into_iter().map(Arc::new).collect(),
            positions,
        })
    }

    /// Parse a JSON array of product records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or a validation
    /// error from [`Catalog::new`].
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_slice(bytes)?;
        Self::new(products)
    }

    /// An empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a product by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Product>> {
        self.positions
            .get(name)
            .and_then(|&position| self.products.get(position))
    }

    /// Position of a product in catalog order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
