//! Error types for colorjson.
//!
//! Rendering never fails: every value has some textual form. The failures
//! that remain are configuration problems and the output destination
//! refusing a write.

use thiserror::Error;

/// Top-level error type for colorjson operations.
#[derive(Error, Debug)]
pub enum ColorJsonError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Output destination errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Convenience type alias for colorjson results.
pub type Result<T> = std::result::Result<T, ColorJsonError>;
