//! # Error Types
//!
//! The checkout screens themselves never fail. These errors cover the
//! plumbing around them: reading booking files, loading configuration,
//! compiling PDFs and writing exports.
//!
//! ## Example
//!
//! ```rust
//! use booking_core::config::CheckoutConfig;
//!
//! let err = CheckoutConfig::from_toml_str("support_whatsapp = \"none\"", "checkout.toml").unwrap_err();
//! assert_eq!(err.error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for booking_core operations
pub type BookingResult<T> = Result<T, BookingError>;

/// Structured error type for checkout plumbing.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BookingError {
    /// An input value is invalid
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Configuration file could not be parsed
    #[error("Config error in '{path}': {reason}")]
    ConfigError { path: String, reason: String },

    /// Document rendering (Typst compile or PDF export) failed
    #[error("Render failed: {stage} - {reason}")]
    RenderFailed { stage: String, reason: String },
}

impl BookingError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        BookingError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        BookingError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        BookingError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error
    pub fn render_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        BookingError::RenderFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BookingError::InvalidInput { .. } => "INVALID_INPUT",
            BookingError::FileError { .. } => "FILE_ERROR",
            BookingError::SerializationError { .. } => "SERIALIZATION_ERROR",
            BookingError::ConfigError { .. } => "CONFIG_ERROR",
            BookingError::RenderFailed { .. } => "RENDER_FAILED",
        }
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::SerializationError {
            reason: err.to_string(),
        }
    }
}
