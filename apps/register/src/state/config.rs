//! # Configuration State
//!
//! Stores register configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SNACK_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use snack_core::{CartLimits, Money, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};
use std::path::PathBuf;
use tracing::warn;

/// Register configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (shell banner)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Maximum distinct lines per cart
    pub max_cart_items: usize,

    /// Maximum quantity per cart line
    pub max_item_quantity: i64,

    /// Explicit journal file; `None` uses the platform data directory
    pub journal_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Snack POS Counter"
    /// - Currency: R$
    /// - Limits: 100 lines, 999 per line
    /// - Journal: platform data directory
    fn default() -> Self {
        ConfigState {
            store_name: "Snack POS Counter".to_string(),
            currency_symbol: "R$".to_string(),
            max_cart_items: MAX_CART_ITEMS,
            max_item_quantity: MAX_ITEM_QUANTITY,
            journal_path: None,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SNACK_STORE_NAME`: Override store name
    /// - `SNACK_CURRENCY_SYMBOL`: Override currency symbol
    /// - `SNACK_MAX_CART_ITEMS`: Override line limit
    /// - `SNACK_MAX_ITEM_QUANTITY`: Override per-line quantity limit
    /// - `SNACK_JOURNAL_PATH`: Write the journal to this file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("SNACK_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("SNACK_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("SNACK_MAX_CART_ITEMS") {
            match raw.trim().parse::<usize>() {
                Ok(max) if max > 0 => config.max_cart_items = max,
                _ => warn!(value = %raw, "Ignoring invalid SNACK_MAX_CART_ITEMS"),
            }
        }

        if let Some(raw) = lookup("SNACK_MAX_ITEM_QUANTITY") {
            match raw.trim().parse::<i64>() {
                Ok(max) if max > 0 => config.max_item_quantity = max,
                _ => warn!(value = %raw, "Ignoring invalid SNACK_MAX_ITEM_QUANTITY"),
            }
        }

        if let Some(path) = lookup("SNACK_JOURNAL_PATH") {
            if !path.trim().is_empty() {
                config.journal_path = Some(PathBuf::from(path));
            }
        }

        config
    }

    /// Cart limits for the session's cart engine.
    pub fn cart_limits(&self) -> CartLimits {
        CartLimits {
            max_lines: self.max_cart_items,
            max_quantity: self.max_item_quantity,
        }
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use snack_core::Money;
    /// use snack_register::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1890)), "R$ 18.90");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{} {:.2}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.to_decimal().abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "R$ 12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "R$ 1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "R$ 0.01");
        assert_eq!(config.format_currency(Money::zero()), "R$ 0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(-2000)), "-R$ 20.00");
        assert_eq!(config.format_currency(Money::from_cents(-5)), "-R$ 0.05");
        assert_eq!(
            config.format_currency(Money::from_cents(i64::MIN)),
            "-R$ 92233720368547758.08"
        );
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("SNACK_STORE_NAME", "Corner Snacks"),
            ("SNACK_CURRENCY_SYMBOL", "$"),
            ("SNACK_MAX_CART_ITEMS", "20"),
            ("SNACK_MAX_ITEM_QUANTITY", "50"),
            ("SNACK_JOURNAL_PATH", "/tmp/journal.jsonl"),
        ]));

        assert_eq!(config.store_name, "Corner Snacks");
        assert_eq!(config.format_currency(Money::from_cents(550)), "$ 5.50");
        assert_eq!(
            config.cart_limits(),
            CartLimits {
                max_lines: 20,
                max_quantity: 50
            }
        );
        assert_eq!(config.journal_path, Some(PathBuf::from("/tmp/journal.jsonl")));
    }

    #[test]
    fn test_from_lookup_ignores_invalid_numbers() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("SNACK_MAX_CART_ITEMS", "lots"),
            ("SNACK_MAX_ITEM_QUANTITY", "-3"),
        ]));

        assert_eq!(config.max_cart_items, MAX_CART_ITEMS);
        assert_eq!(config.max_item_quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_defaults_without_env() {
        assert_eq!(ConfigState::from_lookup(|_| None), ConfigState::default());
    }
}
