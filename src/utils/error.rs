//! Error types for configuration loading and manager construction
//!
//! Routing failures at call time are [`RouterError`]s; this type covers the
//! setup path where configuration files are read and validated.

use crate::core::router::error::RouterError;
use thiserror::Error;

/// Result type alias for setup operations
pub type Result<T> = std::result::Result<T, FailoverError>;

/// Main error type for setup operations
#[derive(Error, Debug)]
pub enum FailoverError {
    /// Malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration parsed but failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Router construction errors
    #[error("Router error: {0}")]
    Router(#[from] RouterError),
}

impl FailoverError {
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Validation(_) | Self::Router(RouterError::Configuration(_))
        )
    }
}
