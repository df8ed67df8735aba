//! Error types for the Spacebears startup configuration

use thiserror::Error;

/// Configuration specific errors
///
/// Every variant names the environment variable it concerns. Values are
/// only echoed back for fields that failed type coercion, which never
/// includes the admin password since text fields always coerce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field has no environment value and no default
    #[error("Missing required configuration field {field}: environment variable {key} is not set")]
    MissingRequiredField { field: String, key: String },

    /// An environment value cannot be coerced to the field's declared type
    #[error("Invalid configuration value for {field}: {key}={value:?} is not a valid {expected}")]
    TypeMismatch {
        field: String,
        key: String,
        value: String,
        expected: String,
    },

    /// An environment value is not valid UTF-8; the value is not echoed
    #[error("Invalid configuration value for {field}: environment variable {key} is not valid UTF-8")]
    NotUnicode { field: String, key: String },

    /// Two spellings of the same key carry different values
    #[error("Conflicting values for environment variable {key}: set more than once with different casing")]
    ConflictingValues { key: String },
}

impl ConfigError {
    /// Environment variable the error is about
    pub fn key(&self) -> &str {
        match self {
            ConfigError::MissingRequiredField { key, .. }
            | ConfigError::TypeMismatch { key, .. }
            | ConfigError::NotUnicode { key, .. }
            | ConfigError::ConflictingValues { key } => key,
        }
    }

    /// Whether this error reports an absent required field
    pub fn is_missing(&self) -> bool {
        matches!(self, ConfigError::MissingRequiredField { .. })
    }
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_variable() {
        let err = ConfigError::MissingRequiredField {
            field: "AdminPassword".to_string(),
            key: "admin_password".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("admin_password"));
        assert!(message.contains("AdminPassword"));
        assert!(err.is_missing());
        assert_eq!(err.key(), "admin_password");
    }

    #[test]
    fn test_type_mismatch_message_names_value() {
        let err = ConfigError::TypeMismatch {
            field: "Port".to_string(),
            key: "port".to_string(),
            value: "abc".to_string(),
            expected: "integer".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("port=\"abc\""));
        assert!(message.contains("integer"));
        assert!(!err.is_missing());
        assert_eq!(err.key(), "port");
    }

    #[test]
    fn test_not_unicode_names_variable() {
        let err = ConfigError::NotUnicode {
            field: "AdminPassword".to_string(),
            key: "admin_password".to_string(),
        };
        assert_eq!(err.key(), "admin_password");
        assert!(err.to_string().contains("UTF-8"));
        assert!(!err.is_missing());
    }

    #[test]
    fn test_conflicting_values_key() {
        let err = ConfigError::ConflictingValues {
            key: "port".to_string(),
        };
        assert_eq!(err.key(), "port");
        assert!(err.to_string().contains("port"));
    }
}
