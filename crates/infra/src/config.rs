//! Configuration loaded from environment variables.

use std::path::PathBuf;

use stocktrack_inventory::CategorySet;

pub const CATEGORIES_VAR: &str = "STOCKTRACK_CATEGORIES";
pub const CURRENCY_VAR: &str = "STOCKTRACK_CURRENCY";
pub const DATA_FILE_VAR: &str = "STOCKTRACK_DATA_FILE";

pub const DEFAULT_CURRENCY: &str = "RWF";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Category labels offered for new items.
    pub categories: CategorySet,
    /// Currency label printed next to values and in exported reports.
    pub currency: String,
    /// JSON file to persist to; `None` keeps everything in memory.
    pub data_file: Option<PathBuf>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            categories: CategorySet::default(),
            currency: DEFAULT_CURRENCY.to_string(),
            data_file: None,
        }
    }
}

impl InventoryConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// missing or blank values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(CATEGORIES_VAR) {
            let categories = CategorySet::new(raw.split(','));
            if categories.is_empty() {
                tracing::warn!("{CATEGORIES_VAR} has no usable labels; using defaults");
            } else {
                config.categories = categories;
            }
        }

        if let Some(currency) = lookup(CURRENCY_VAR).map(|c| c.trim().to_string()) {
            if !currency.is_empty() {
                config.currency = currency;
            }
        }

        config.data_file = lookup(DATA_FILE_VAR)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        config
    }
}
