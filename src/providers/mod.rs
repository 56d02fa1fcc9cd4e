//! Provider module for GenBI
//!
//! Contains the response-provider abstraction and the canned implementation
//! that simulates a BI backend locally.

pub mod base;
pub mod canned;

pub use base::ResponseProvider;
pub use canned::{CannedInsightProvider, ResponseShape};

use crate::config::ProviderConfig;
use crate::error::{GenbiError, Result};
use std::time::Duration;

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration, including the provider type
///
/// # Errors
///
/// Returns `GenbiError::Provider` if the configured type is unknown.
///
/// # Examples
///
/// ```
/// use genbi::config::ProviderConfig;
/// use genbi::providers::create_provider;
///
/// let provider = create_provider(&ProviderConfig::default()).unwrap();
/// assert_eq!(provider.name(), "canned");
/// ```
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn ResponseProvider>> {
    match config.provider_type.as_str() {
        "canned" => Ok(Box::new(CannedInsightProvider::new(Duration::from_millis(
            config.canned.delay_ms,
        )))),
        other => Err(GenbiError::Provider(format!("Unknown provider type: {}", other)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CannedConfig;

    #[test]
    fn test_create_provider_canned() {
        let config = ProviderConfig {
            provider_type: "canned".to_string(),
            canned: CannedConfig { delay_ms: 0 },
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "canned");
    }

    #[test]
    fn test_create_provider_invalid_type() {
        let config = ProviderConfig {
            provider_type: "tableau".to_string(),
            canned: CannedConfig::default(),
        };
        assert!(create_provider(&config).is_err());
    }
}
