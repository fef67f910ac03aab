//! Centralized error types for vexbench.
//!
//! Uses thiserror for ergonomic error handling with context.

use thiserror::Error;

/// Main error type for vexbench operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum VexbenchError {
    /// Invalid benchmark configuration detected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic error with context.
    #[error("{0}")]
    Other(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, VexbenchError>;
