//! Error types for cdigest
//!
//! This module defines all custom error types used throughout the application.
//! We use thiserror to derive Error trait implementations with zero runtime overhead.

use thiserror::Error;

/// Result type alias for cdigest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cdigest
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors from filesystem operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Glob pattern compilation errors
    #[error("Invalid ignore pattern: {0}")]
    PatternError(#[from] globset::Error),

    /// Configuration file parsing errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Path errors
    #[error("Invalid path: {0}")]
    PathError(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new general error with a custom message
    pub fn general<S: Into<String>>(msg: S) -> Self {
        Error::General(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }

    /// Create a new path error
    pub fn path<S: Into<String>>(msg: S) -> Self {
        Error::PathError(msg.into())
    }
}
