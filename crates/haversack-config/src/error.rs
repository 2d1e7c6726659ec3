//! # Config Error Types
//!
//! Failures while reading, validating or writing `rules.toml`.

use haversack_core::ValidationError;
use thiserror::Error;

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or parsed.
    #[error("Failed to load rules: {0}")]
    LoadFailed(String),

    /// File could not be serialized or written.
    #[error("Failed to save rules: {0}")]
    SaveFailed(String),

    /// Neither an explicit path nor a platform config directory is available.
    #[error("No rules file path available")]
    NoConfigPath,

    /// A custom entry failed validation.
    #[error("Invalid rules: {0}")]
    Invalid(#[from] ValidationError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::from(ValidationError::Duplicate {
            field: "pack type id".into(),
            value: "mule-pack".into(),
        });
        assert_eq!(
            err.to_string(),
            "Invalid rules: pack type id 'mule-pack' already exists"
        );
    }

    #[test]
    fn test_toml_errors_are_load_failures() {
        let err: ConfigError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
        assert!(matches!(err, ConfigError::LoadFailed(_)));
    }
}
