//! Cart store settings.

use serde::{Deserialize, Serialize};

/// Key the cart snapshot is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "smartfarm_cart";

/// Maximum quantity allowed per entry.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Settings for a [`CartStore`](crate::cart::CartStore).
///
/// Deserializes from the `[cart]` table of the application config; missing
/// keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Storage key holding the snapshot.
    pub storage_key: String,
    /// Upper bound on a single entry's quantity.
    pub max_quantity_per_item: i64,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_quantity_per_item: MAX_QUANTITY_PER_ITEM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "smartfarm_cart");
        assert_eq!(config.max_quantity_per_item, 9999);
    }

    #[test]
    fn test_partial_deserialize() {
        let config: CartConfig = serde_json::from_str(r#"{"storage_key": "tab_cart"}"#).unwrap();
        assert_eq!(config.storage_key, "tab_cart");
        assert_eq!(config.max_quantity_per_item, MAX_QUANTITY_PER_ITEM);
    }
}
