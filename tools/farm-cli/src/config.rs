//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use farm_commerce::cart::CartConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart store settings.
    #[serde(default)]
    pub cart: CartConfig,

    /// Where the cart snapshot lives on disk.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Validate settings, returning one message per problem.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.cart.storage_key.trim().is_empty() {
            errors.push("cart.storage_key must not be empty".to_string());
        }
        if self.cart.max_quantity_per_item <= 0 {
            errors.push("cart.max_quantity_per_item must be positive".to_string());
        }
        if !self.api.base_url.starts_with("http") {
            errors.push(format!(
                "api.base_url '{}' must be an http(s) URL",
                self.api.base_url
            ));
        }

        errors
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Snapshot storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the file-backed store. Relative paths resolve against
    /// the directory holding the config file.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".smartfarm")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Backend API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; product images are served from `{base_url}/uploads/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Generate a default smartfarm.toml config file.
pub fn generate_default_config() -> String {
    r#"# SmartFarm CLI configuration

[cart]
storage_key = "smartfarm_cart"
max_quantity_per_item = 9999

[storage]
data_dir = ".smartfarm"

[api]
base_url = "http://localhost:8080"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_config() {
        let config: CliConfig = toml::from_str(
            r#"
[cart]
max_quantity_per_item = 20
"#,
        )
        .unwrap();
        assert_eq!(config.cart.max_quantity_per_item, 20);
        assert_eq!(config.cart.storage_key, "smartfarm_cart");
        assert_eq!(config.storage.data_dir, PathBuf::from(".smartfarm"));
    }

    #[test]
    fn test_validate_reports_problems() {
        let mut config = CliConfig::default();
        config.cart.storage_key = " ".to_string();
        config.cart.max_quantity_per_item = 0;
        config.api.base_url = "localhost".to_string();
        assert_eq!(config.validate().len(), 3);
    }

    #[test]
    fn test_load_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("smartfarm.json");
        std::fs::write(&json_path, r#"{"api": {"base_url": "https://api.smartfarm.id"}}"#).unwrap();
        let config = CliConfig::load(&json_path).unwrap();
        assert_eq!(config.api.base_url, "https://api.smartfarm.id");

        let toml_path = dir.path().join("smartfarm.toml");
        std::fs::write(&toml_path, "[storage]\ndata_dir = \"/var/lib/smartfarm\"\n").unwrap();
        let config = CliConfig::load(&toml_path).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/smartfarm"));
    }
}
