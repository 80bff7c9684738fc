//! # Catalog Lookup
//!
//! The read-only product source the session consults before adding to the
//! cart. The engines never hold a catalog themselves; they receive products
//! by value.
//!
//! [`InMemoryCatalog`] is the menu the register app seeds at startup. It also
//! answers the menu screen's questions: search by name, filter by category,
//! list categories.

use tracing::debug;

use crate::error::CoreResult;
use crate::types::Product;
use crate::validation::{
    validate_category, validate_price, validate_product_id, validate_product_name,
    validate_search_query,
};

/// Single read operation the core consumes from a product source.
pub trait CatalogLookup {
    /// Returns the product with this id, if any.
    fn get_product(&self, id: &str) -> Option<Product>;
}

/// Insertion-ordered, in-memory menu.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list of products, validating each one.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> CoreResult<Self> {
        let mut catalog = Self::new();
        for product in products {
            catalog.insert(product)?;
        }
        Ok(catalog)
    }

    /// Adds a product, or replaces the one with the same id in place.
    pub fn insert(&mut self, product: Product) -> CoreResult<()> {
        validate_product_id(&product.id)?;
        validate_product_name(&product.name)?;
        validate_category(&product.category)?;
        validate_price(product.unit_price)?;

        debug!(product_id = %product.id, name = %product.name, "catalog insert");

        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.products.push(product),
        }
        Ok(())
    }

    /// Case-insensitive name search with an optional exact category filter.
    ///
    /// An empty term matches every product.
    pub fn search(&self, term: &str, category: Option<&str>) -> CoreResult<Vec<Product>> {
        let term = validate_search_query(term)?.to_lowercase();

        Ok(self
            .products
            .iter()
            .filter(|p| term.is_empty() || p.name.to_lowercase().contains(&term))
            .filter(|p| category.map_or(true, |c| p.category == c))
            .cloned()
            .collect())
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogLookup for InMemoryCatalog {
    fn get_product(&self, id: &str) -> Option<Product> {
        self.products.iter().find(|p| p.id == id).cloned()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use crate::money::Money;

    fn menu() -> InMemoryCatalog {
        InMemoryCatalog::from_products(vec![
            Product::new("1", "Cheeseburger Deluxe", Money::from_cents(1890), "Burgers"),
            Product::new("2", "Bacon Burger", Money::from_cents(1690), "Burgers"),
            Product::new("4", "Cola 350ml", Money::from_cents(550), "Drinks"),
            Product::new("7", "Small Fries", Money::from_cents(890), "Sides"),
            Product::new("8", "Large Fries", Money::from_cents(1690), "Sides"),
        ])
        .unwrap()
    }

    #[test]
    fn test_get_product_by_id() {
        let catalog = menu();
        assert_eq!(catalog.get_product("4").unwrap().name, "Cola 350ml");
        assert!(catalog.get_product("99").is_none());
    }

    #[test]
    fn test_search_by_name_and_category() {
        let catalog = menu();

        let fries = catalog.search("FRIES", None).unwrap();
        assert_eq!(fries.len(), 2);

        let burgers = catalog.search("", Some("Burgers")).unwrap();
        let ids: Vec<_> = burgers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        assert!(catalog.search("fries", Some("Drinks")).unwrap().is_empty());
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(menu().categories(), vec!["Burgers", "Drinks", "Sides"]);
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut catalog = menu();
        catalog
            .insert(Product::new("4", "Cola 600ml", Money::from_cents(800), "Drinks"))
            .unwrap();

        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.get_product("4").unwrap().unit_price.cents(), 800);
    }

    #[test]
    fn test_insert_rejects_invalid_products() {
        let mut catalog = InMemoryCatalog::new();

        let negative = Product::new("x", "Broken", Money::from_cents(-1), "Misc");
        assert!(matches!(
            catalog.insert(negative),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));

        let unnamed = Product::new("y", " ", Money::zero(), "Misc");
        assert!(matches!(
            catalog.insert(unnamed),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));

        assert!(catalog.is_empty());
    }
}
