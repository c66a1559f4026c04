//! Error types for Lockstep

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LockstepError
pub type Result<T> = std::result::Result<T, LockstepError>;

/// Main error type for Lockstep operations
#[derive(Debug, Error)]
pub enum LockstepError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Manifest-related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Recursive wildcard combined with an explicit node_modules segment.
    /// Globstar patterns already exclude node_modules, so this combination
    /// is always a user mistake.
    #[error("An explicit node_modules package path does not allow globstars (**)")]
    GlobstarWithNodeModules,

    /// Malformed glob pattern
    #[error("Invalid package pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Manifest-related errors
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("Package manifest not found at {0}")]
    NotFound(PathBuf),

    /// Failed to parse manifest
    #[error("Failed to parse manifest: {0}")]
    ParseFailed(String),

    /// Failed to write manifest
    #[error("Failed to write manifest: {0}")]
    WriteFailed(String),

    /// Invalid package name
    #[error("Invalid package name: '{0}'")]
    InvalidName(String),
}

impl LockstepError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
