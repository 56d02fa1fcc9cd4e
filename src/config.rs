//! Configuration management for GenBI
//!
//! Handles loading, parsing, and validating configuration from a YAML file,
//! including the static datasource catalog displayed in chat.

use crate::error::{GenbiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for GenBI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Response provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Chat behavior configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Static datasource catalog
    #[serde(default = "default_datasources")]
    pub datasources: Vec<DatasourceDescriptor>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            chat: ChatConfig::default(),
            datasources: default_datasources(),
        }
    }
}

/// Provider configuration
///
/// Specifies which response provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Canned provider configuration
    #[serde(default)]
    pub canned: CannedConfig,
}

fn default_provider_type() -> String {
    "canned".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            canned: CannedConfig::default(),
        }
    }
}

/// Canned provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CannedConfig {
    /// Simulated round-trip latency in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_delay_ms() -> u64 {
    1200
}

impl Default for CannedConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

/// Chat behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Greeting seeded into every new session
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Title given to freshly created sessions
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Datasource selected when none is given on the command line
    #[serde(default = "default_datasource_id")]
    pub default_datasource: String,
}

fn default_greeting() -> String {
    "Hi! I'm your BI assistant. Ask me about revenue trends, product performance, \
     or regional breakdowns."
        .to_string()
}

fn default_title() -> String {
    "New chat".to_string()
}

fn default_datasource_id() -> String {
    "sales".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            default_title: default_title(),
            default_datasource: default_datasource_id(),
        }
    }
}

/// Static metadata describing a queryable data source
///
/// Used only for display and selection; selecting a datasource never alters
/// canned query behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasourceDescriptor {
    /// Short identifier used on the command line
    pub id: String,
    /// Display name
    pub name: String,
    /// One-line definition text
    pub definition: String,
    /// Globally unique identifier of the underlying source
    pub luid: String,
    /// Ordered list of queryable attributes
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,
}

/// A named, typed, described attribute of a datasource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    /// Attribute name (dotted paths for nested fields)
    pub name: String,
    /// Logical type (string, temporal, integer, number)
    #[serde(rename = "type")]
    pub attr_type: String,
    /// Human-readable description
    pub description: String,
}

fn attr(name: &str, attr_type: &str, description: &str) -> AttributeDescriptor {
    AttributeDescriptor {
        name: name.to_string(),
        attr_type: attr_type.to_string(),
        description: description.to_string(),
    }
}

/// Built-in sample catalog used when the config file defines none
fn default_datasources() -> Vec<DatasourceDescriptor> {
    vec![DatasourceDescriptor {
        id: "sales".to_string(),
        name: "Sales Orders".to_string(),
        definition: "Order-level sales with nested customer and line-item detail".to_string(),
        luid: "b3f1c2d4-5a6e-4f7b-8c9d-0e1f2a3b4c5d".to_string(),
        attributes: vec![
            attr("order_id", "string", "Unique order identifier"),
            attr("order_date", "temporal", "Order timestamp (ISO)"),
            attr("customer.id", "string", "Customer ID"),
            attr("customer.name", "string", "Customer full name"),
            attr("customer.region", "string", "Customer region or market"),
            attr("items[].product_id", "string", "Product SKU"),
            attr("items[].category", "string", "Product category"),
            attr("items[].quantity", "integer", "Quantity purchased of the product"),
            attr("items[].unit_price", "number", "Unit price in USD"),
            attr("items[].revenue", "number", "quantity * unit_price (derived)"),
            attr("shipping_method", "string", "Shipping method used"),
            attr("status", "string", "Order status (delivered, returned, pending)"),
        ],
    }]
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// A missing file falls back to the built-in defaults so the binary
    /// works out of the box.
    ///
    /// # Errors
    ///
    /// Returns `GenbiError::Yaml` if the file exists but does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&raw)?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `GenbiError::Config` when the catalog is empty, datasource
    /// ids collide, or the default datasource is not in the catalog.
    pub fn validate(&self) -> Result<()> {
        if self.datasources.is_empty() {
            return Err(GenbiError::Config("datasource catalog is empty".into()).into());
        }

        let mut seen = std::collections::HashSet::new();
        for ds in &self.datasources {
            if !seen.insert(ds.id.as_str()) {
                return Err(
                    GenbiError::Config(format!("duplicate datasource id: {}", ds.id)).into(),
                );
            }
        }

        if self.find_datasource(&self.chat.default_datasource).is_none() {
            return Err(GenbiError::Config(format!(
                "default datasource '{}' is not in the catalog",
                self.chat.default_datasource
            ))
            .into());
        }

        Ok(())
    }

    /// Look up a datasource descriptor by id
    pub fn find_datasource(&self, id: &str) -> Option<&DatasourceDescriptor> {
        self.datasources.iter().find(|ds| ds.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_validates() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_catalog_has_sales_datasource() {
        let config = Config::default();
        let ds = config.find_datasource("sales").expect("sales datasource");
        assert_eq!(ds.name, "Sales Orders");
        assert!(!ds.attributes.is_empty());
        assert!(ds.attributes.iter().any(|a| a.name == "items[].revenue"));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = Config::load("/nonexistent/genbi.yaml").unwrap();
        assert_eq!(config.provider.provider_type, "canned");
        assert_eq!(config.provider.canned.delay_ms, 1200);
    }

    #[test]
    fn test_load_parses_yaml_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
provider:
  type: canned
  canned:
    delay_ms: 50
chat:
  greeting: "Welcome"
  default_title: "Untitled"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.provider.canned.delay_ms, 50);
        assert_eq!(config.chat.greeting, "Welcome");
        assert_eq!(config.chat.default_title, "Untitled");
        // Catalog falls back to the built-in sample when omitted.
        assert!(config.find_datasource("sales").is_some());
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "provider: [unclosed").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_catalog() {
        let mut config = Config::default();
        config.datasources.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut config = Config::default();
        let dup = config.datasources[0].clone();
        config.datasources.push(dup);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_default_datasource() {
        let mut config = Config::default();
        config.chat.default_datasource = "inventory".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_find_datasource_unknown_returns_none() {
        let config = Config::default();
        assert!(config.find_datasource("nope").is_none());
    }
}
