//! Core error types for safebite-core.
//!
//! Nothing in the food journal is fatal: storage failures degrade to
//! in-memory state and scoring never fails. The errors defined here surface
//! at the edges, where a form is validated or a file is read or written.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for safebite-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Form validation errors
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised by a [`KvStore`](crate::storage::KvStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Key is not a valid store key
    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),

    /// Reading a value failed
    #[error("Failed to read '{key}' from {path}: {source}")]
    ReadFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a value failed
    #[error("Failed to write '{key}' to {path}: {source}")]
    WriteFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Storage is disabled or otherwise not reachable
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
///
/// The display text is the message shown to the user next to the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required form field was left blank
    #[error("{message}")]
    MissingField { field: String, message: String },

    /// A field has a value outside its accepted range
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// An operation that needs a signed-in user ran without one
    #[error("Not signed in. Run `safebite login` first.")]
    NotSignedIn,
}

impl ValidationError {
    /// Missing-field error with a custom user-visible message.
    pub fn missing(field: &str, message: impl Into<String>) -> Self {
        ValidationError::MissingField {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Field name the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField { field, .. }
            | ValidationError::InvalidValue { field, .. } => Some(field),
            ValidationError::NotSignedIn => None,
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
