//! Error types for GenBI
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for GenBI operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, provider interactions, session storage,
/// and transcript export.
#[derive(Error, Debug)]
pub enum GenbiError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (query dispatch, unknown provider type)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Session storage errors (slot resolution, serialization)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Unknown or ambiguous session reference
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Unknown datasource identifier
    #[error("Datasource not found: {0}")]
    DatasourceNotFound(String),

    /// Transcript export errors (rendering, target file)
    #[error("Export error: {0}")]
    Export(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for GenBI operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = GenbiError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_provider_error_display() {
        let error = GenbiError::Provider("unknown type: http".to_string());
        assert_eq!(error.to_string(), "Provider error: unknown type: http");
    }

    #[test]
    fn test_storage_error_display() {
        let error = GenbiError::Storage("could not resolve data directory".to_string());
        assert_eq!(
            error.to_string(),
            "Storage error: could not resolve data directory"
        );
    }

    #[test]
    fn test_session_not_found_display() {
        let error = GenbiError::SessionNotFound("01ARZ3".to_string());
        assert_eq!(error.to_string(), "Session not found: 01ARZ3");
    }

    #[test]
    fn test_datasource_not_found_display() {
        let error = GenbiError::DatasourceNotFound("inventory".to_string());
        assert_eq!(error.to_string(), "Datasource not found: inventory");
    }

    #[test]
    fn test_export_error_display() {
        let error = GenbiError::Export("empty transcript".to_string());
        assert_eq!(error.to_string(), "Export error: empty transcript");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: GenbiError = io_error.into();
        assert!(matches!(error, GenbiError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{bad json}").unwrap_err();
        let error: GenbiError = json_error.into();
        assert!(matches!(error, GenbiError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: GenbiError = yaml_error.into();
        assert!(matches!(error, GenbiError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GenbiError>();
    }
}
