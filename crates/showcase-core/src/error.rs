//! Error types for showcase operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! across all showcase crates. Uses `thiserror` for derive macros.
//!
//! Data-shape anomalies in CMS records (missing description, missing icon)
//! are not errors; they are normalised to empty strings where records are
//! assembled. Carousel navigation never fails.

use thiserror::Error;

/// Boxed error source carried by [`Error::Backend`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur in showcase operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The CMS backend could not be reached or answered with a failure.
    #[error("Backend error: {message}")]
    Backend {
        /// What was being attempted.
        message: String,
        /// Underlying transport or decoding failure, if any.
        #[source]
        source: Option<BoxError>,
    },

    /// A schema migration could not be applied or reverted.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a backend error without an underlying cause.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a backend error wrapping the failure that caused it.
    pub fn backend_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Backend {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Returns `true` for configuration errors.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` for backend communication errors.
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result type alias using the showcase `Error` type.
pub type Result<T> = std::result::Result<T, Error>;
