//! The cart store.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::types::{Product, ProductName};

use super::summary::CartSummary;

/// One unit of one product in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    product: Arc<Product>,
}

impl CartLine {
    #[must_use]
    pub const fn new(product: Arc<Product>) -> Self {
        Self { product }
    }

    #[must_use]
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    #[must_use]
    pub fn name(&self) -> &ProductName {
        &self.product.name
    }
}

/// Ordered sequence of cart lines.
///
/// Lines are not pre-aggregated: adding the same product twice stores two
/// lines. The quantity of a product is the number of lines carrying its name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild a store from its ordered product names.
    ///
    /// Names missing from the catalog are skipped and returned so the caller
    /// can report them.
    #[must_use]
    pub fn restore(catalog: &Catalog, names: &[ProductName]) -> (Self, Vec<ProductName>) {
        let mut store = Self::new();
        let mut unknown = Vec::new();

        for name in names {
            match catalog.get(name.as_str()) {
                Some(product) => store.add_unit(Arc::clone(product)),
                None => unknown.push(name.clone()),
            }
        }

        (store, unknown)
    }

    /// Ordered product names, one per line.
    #[must_use]
    pub fn product_names(&self) -> Vec<ProductName> {
        self.lines.iter().map(|line| line.name().clone()).collect()
    }

    /// Append one unit of `product`.
    pub fn add_unit(&mut self, product: Arc<Product>) {
        self.lines.push(CartLine::new(product));
    }

    /// Remove the first line matching `name`.
    ///
    /// Returns `false` and leaves the store untouched when nothing matches.
    pub fn remove_unit(&mut self, name: &str) -> bool {
        match self.lines.iter().position(|line| line.name().as_str() == name) {
            Some(index) => {
                self.lines.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every line matching `name`, returning how many were removed.
    pub fn remove_all_units(&mut self, name: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| line.name().as_str() != name);
        before - self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of units of `name` in the cart.
    #[must_use]
    pub fn quantity_of(&self, name: &str) -> usize {
        self.lines
            .iter()
            .filter(|line| line.name().as_str() == name)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Grouped view of the current lines.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_lines(&self.lines)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;

    fn catalog() -> Catalog {
        Catalog::new(vec![product("A", 500), product("B", 350)]).unwrap()
    }

    fn unit(catalog: &Catalog, name: &str) -> Arc<Product> {
        Arc::clone(catalog.get(name).unwrap())
    }

    #[test]
    fn test_add_appends_one_line_per_unit() {
        let catalog = catalog();
        let mut cart = CartStore::new();
        cart.add_unit(unit(&catalog, "A"));
        cart.add_unit(unit(&catalog, "B"));
        cart.add_unit(unit(&catalog, "A"));

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.quantity_of("A"), 2);
        assert_eq!(cart.quantity_of("B"), 1);
        assert_eq!(
            cart.product_names(),
            ["A", "B", "A"].map(ProductName::from).to_vec()
        );
    }

    #[test]
    fn test_remove_unit_takes_first_match() {
        let catalog = catalog();
        let mut cart = CartStore::new();
        cart.add_unit(unit(&catalog, "A"));
        cart.add_unit(unit(&catalog, "B"));
        cart.add_unit(unit(&catalog, "A"));

        assert!(cart.remove_unit("A"));
        assert_eq!(
            cart.product_names(),
            ["B", "A"].map(ProductName::from).to_vec()
        );
    }

    #[test]
    fn test_remove_unit_without_match_is_noop() {
        let catalog = catalog();
        let mut cart = CartStore::new();
        assert!(!cart.remove_unit("A"));
        assert!(cart.is_empty());

        cart.add_unit(unit(&catalog, "B"));
        let before = cart.clone();
        assert!(!cart.remove_unit("A"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_all_units() {
        let catalog = catalog();
        let mut cart = CartStore::new();
        cart.add_unit(unit(&catalog, "A"));
        cart.add_unit(unit(&catalog, "B"));
        cart.add_unit(unit(&catalog, "A"));

        assert_eq!(cart.remove_all_units("A"), 2);
        assert_eq!(cart.quantity_of("A"), 0);
        assert_eq!(cart.quantity_of("B"), 1);
        assert_eq!(cart.remove_all_units("A"), 0);
    }

    #[test]
    fn test_clear_zeroes_every_quantity() {
        let catalog = catalog();
        let mut cart = CartStore::new();
        cart.add_unit(unit(&catalog, "A"));
        cart.add_unit(unit(&catalog, "B"));
        cart.clear();

        assert!(cart.is_empty());
        for product in catalog.products() {
            assert_eq!(cart.quantity_of(product.name.as_str()), 0);
        }
    }

    #[test]
    fn test_quantity_tracks_mixed_operations() {
        let catalog = catalog();
        let mut cart = CartStore::new();
        let mut added = 0_usize;

        let ops = ["add", "add", "remove", "remove", "remove", "add", "remove-all", "add"];
        for op in ops {
            match op {
                "add" => {
                    cart.add_unit(unit(&catalog, "A"));
                    added += 1;
                }
                "remove" => {
                    let had = cart.quantity_of("A");
                    assert_eq!(cart.remove_unit("A"), had > 0);
                }
                _ => {
                    cart.remove_all_units("A");
                }
            }
            let quantity = cart.quantity_of("A");
            assert!(quantity <= added);
            let matching = cart
                .lines()
                .iter()
                .filter(|line| line.name().as_str() == "A")
                .count();
            assert_eq!(quantity, matching);
        }
        assert_eq!(cart.quantity_of("A"), 1);
    }

    #[test]
    fn test_restore_skips_unknown_names() {
        let catalog = catalog();
        let names = ["A", "Gone", "B", "A"].map(ProductName::from);
        let (cart, unknown) = CartStore::restore(&catalog, &names);

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.quantity_of("A"), 2);
        assert_eq!(unknown, vec![ProductName::from("Gone")]);
    }
}
