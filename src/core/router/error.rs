//! Router error types
//!
//! Terminal errors returned to callers. Per-attempt [`ProviderError`]s never
//! escape on their own; they are folded into
//! [`RouterError::AllProvidersExhausted`].

use super::fallback::CallAttempt;
use crate::core::providers::{ProviderError, ProviderType};
use crate::core::types::OperationKind;

/// Router error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum RouterError {
    /// Unknown service key, unknown provider id or malformed configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Every candidate failed or no candidate could serve the operation
    #[error(
        "All providers exhausted for service '{service}' ({operation}): attempted [{}]{}",
        join_providers(.attempted),
        last_error_suffix(.last_error)
    )]
    AllProvidersExhausted {
        service: String,
        operation: OperationKind,
        /// Error of the final failed attempt, `None` if nothing was attempted
        last_error: Option<ProviderError>,
        /// Candidates tried, in order
        attempted: Vec<ProviderType>,
        /// Every individual attempt, in order
        attempts: Vec<CallAttempt>,
    },

    /// The manager was torn down before the call started
    #[error("Provider manager has been destroyed")]
    ManagerDestroyed,
}

fn join_providers(providers: &[ProviderType]) -> String {
    providers
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn last_error_suffix(error: &Option<ProviderError>) -> String {
    error
        .as_ref()
        .map(|e| format!("; last error: {}", e))
        .unwrap_or_default()
}

impl RouterError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::AllProvidersExhausted { .. })
    }

    /// Last underlying provider error of an exhausted call
    pub fn last_error(&self) -> Option<&ProviderError> {
        match self {
            Self::AllProvidersExhausted { last_error, .. } => last_error.as_ref(),
            _ => None,
        }
    }

    /// Candidates attempted by an exhausted call
    pub fn attempted(&self) -> &[ProviderType] {
        match self {
            Self::AllProvidersExhausted { attempted, .. } => attempted,
            _ => &[],
        }
    }
}
