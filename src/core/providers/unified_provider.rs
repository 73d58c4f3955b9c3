//! Unified provider error
//!
//! Single per-attempt error type for every provider. The router folds these
//! into its own terminal errors; callers never see them directly except as the
//! `last_error` of an exhausted call.
//!
//! | Variant | Meaning | Router handling |
//! |------|------|--------|
//! | Transient | network, rate limit, 5xx-class | retried, then failover |
//! | Authentication | credentials rejected | retried like Transient unless the service opts out |
//! | Vendor | any other vendor-reported failure | retried, then failover |
//! | Timeout | attempt exceeded the service request timeout | retried, then failover |
//! | NotSupported | provider lacks the operation | candidate skipped, no retry |

use super::ProviderType;
use crate::core::types::OperationKind;

/// Unified provider error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("Transient error from {provider}: {message}")]
    Transient {
        provider: ProviderType,
        message: String,
    },

    #[error("Authentication failed for {provider}: {message}")]
    Authentication {
        provider: ProviderType,
        message: String,
    },

    #[error("Vendor error from {provider}{}: {message}", status_suffix(.status))]
    Vendor {
        provider: ProviderType,
        status: Option<u16>,
        message: String,
    },

    #[error("Request to {provider} timed out after {elapsed_ms}ms")]
    Timeout {
        provider: ProviderType,
        elapsed_ms: u64,
    },

    #[error("Operation '{operation}' not supported by {provider}")]
    NotSupported {
        provider: ProviderType,
        operation: OperationKind,
    },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {})", s)).unwrap_or_default()
}

impl ProviderError {
    pub fn transient(provider: ProviderType, message: impl Into<String>) -> Self {
        Self::Transient {
            provider,
            message: message.into(),
        }
    }

    pub fn authentication(provider: ProviderType, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider,
            message: message.into(),
        }
    }

    pub fn vendor(provider: ProviderType, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Vendor {
            provider,
            status,
            message: message.into(),
        }
    }

    pub fn timeout(provider: ProviderType, elapsed_ms: u64) -> Self {
        Self::Timeout {
            provider,
            elapsed_ms,
        }
    }

    pub fn not_supported(provider: ProviderType, operation: OperationKind) -> Self {
        Self::NotSupported {
            provider,
            operation,
        }
    }

    /// Provider that produced this error
    pub fn provider(&self) -> &ProviderType {
        match self {
            Self::Transient { provider, .. }
            | Self::Authentication { provider, .. }
            | Self::Vendor { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::NotSupported { provider, .. } => provider,
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }

    /// Whether another attempt against the same provider can succeed
    ///
    /// Authentication failures count as retryable here; whether the router
    /// actually retries them is a per-service policy.
    pub fn is_retryable(&self) -> bool {
        !self.is_not_supported()
    }
}
