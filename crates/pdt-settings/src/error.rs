//! Error types for the settings system

use thiserror::Error;

/// Errors that can occur when reading or writing settings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingError {
    /// Setting not found
    #[error("Setting not found: {0}")]
    NotFound(String),

    /// Invalid value for the setting
    #[error("Invalid value for setting '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl SettingError {
    /// Create an invalid value error
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        SettingError::InvalidValue {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
