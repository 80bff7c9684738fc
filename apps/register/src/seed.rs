//! # Menu Seed
//!
//! The snack-bar menu the register starts with.

use snack_core::{CoreResult, InMemoryCatalog, Money, Product};

/// (id, name, price in cents, category)
const MENU: &[(&str, &str, i64, &str)] = &[
    ("1", "Cheeseburger Deluxe", 1890, "Burgers"),
    ("2", "Salad Burger", 1590, "Burgers"),
    ("3", "Bacon Burger", 1690, "Burgers"),
    ("4", "Cola 350ml", 550, "Drinks"),
    ("5", "Mineral Water 500ml", 350, "Drinks"),
    ("6", "Fresh Juice", 790, "Drinks"),
    ("7", "Small Fries", 890, "Sides"),
    ("8", "Medium Fries", 1290, "Sides"),
    ("9", "Large Fries", 1690, "Sides"),
    ("10", "Açaí Bowl 300ml", 1490, "Desserts"),
    ("11", "Flan", 890, "Desserts"),
    ("12", "Ice Cream", 790, "Desserts"),
];

/// Builds the catalog from the built-in menu.
pub fn seeded_catalog() -> CoreResult<InMemoryCatalog> {
    InMemoryCatalog::from_products(MENU.iter().map(|&(id, name, cents, category)| {
        Product::new(id, name, Money::from_cents(cents), category)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use snack_core::CatalogLookup;

    #[test]
    fn test_seeded_catalog() {
        let catalog = seeded_catalog().unwrap();
        assert_eq!(catalog.len(), 12);
        assert_eq!(
            catalog.categories(),
            vec!["Burgers", "Drinks", "Sides", "Desserts"]
        );

        let burger = catalog.get_product("1").unwrap();
        assert_eq!(burger.unit_price.cents(), 1890);
    }
}
