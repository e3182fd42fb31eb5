//! Error types for binding generation.

use thiserror::Error;

/// Error type for binding generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Registry parsing error.
    #[error("registry parse error: {0}")]
    Parse(#[from] glbind_registry::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A finished artifact could not be moved into place.
    #[error("failed to persist artifact: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// The version selector matched nothing.
    #[error("no registry version matches '{selector}'")]
    VersionNotFound {
        /// Selector description.
        selector: String,
    },

    /// Output path without a usable parent directory or file name.
    #[error("invalid output path: {message}")]
    InvalidPath {
        /// Error message.
        message: String,
    },

    /// Configuration rejected before generation.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a version-not-found error for the given selector.
    pub fn version_not_found(selector: impl Into<String>) -> Self {
        Self::VersionNotFound {
            selector: selector.into(),
        }
    }

    /// Creates an invalid-path error with the given message.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath {
            message: message.into(),
        }
    }

    /// Creates an invalid-config error with the given message.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
