//! # Product Commands
//!
//! Menu search and category listing.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator types: menu --category Drinks cola                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  search_menu("cola", Some("Drinks"))                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │  Name contains term (case-insensitive)    │                         │
//! │  │  AND category matches exactly (if given)  │                         │
//! │  └───────────────────────────────────────────┘                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<ProductDto> in menu order                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::SessionState;
use snack_core::Product;

/// Product as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub category: String,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            name: p.name,
            price_cents: p.unit_price.cents(),
            category: p.category,
        }
    }
}

/// Searches the menu by name, optionally within one category.
///
/// ## Arguments
/// * `term` - Name fragment; empty lists everything
/// * `category` - Exact category name
pub fn search_menu(
    session: &SessionState,
    term: &str,
    category: Option<&str>,
) -> Result<Vec<ProductDto>, ApiError> {
    debug!(term = %term, ?category, "search_menu command");

    let products = session.with_session(|s| s.catalog().search(term, category))?;
    Ok(products.into_iter().map(ProductDto::from).collect())
}

/// Lists menu categories in menu order.
pub fn list_categories(session: &SessionState) -> Vec<String> {
    debug!("list_categories command");
    session.with_session(|s| s.catalog().categories())
}
