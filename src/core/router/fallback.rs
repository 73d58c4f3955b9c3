//! Execution result and attempt bookkeeping

use crate::core::providers::ProviderType;
use std::time::Duration;

/// Execution result with metadata
///
/// Returned by a successful `execute`. `attempts` counts every attempt made
/// across all candidates, including the successful one.
#[derive(Debug, Clone)]
pub struct ExecutionResult<T> {
    /// The successful result value
    pub result: T,
    /// Provider that produced the result
    pub provider: ProviderType,
    /// Model used on that provider
    pub model: String,
    /// Total number of attempts across all candidates
    pub attempts: u32,
    /// Whether the result came from a provider other than the service primary
    pub used_fallback: bool,
    /// Wall time of the whole call, retries and delays included
    pub latency: Duration,
}

impl<T> ExecutionResult<T> {
    /// Map the result value, keeping the metadata
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExecutionResult<U> {
        ExecutionResult {
            result: f(self.result),
            provider: self.provider,
            model: self.model,
            attempts: self.attempts,
            used_fallback: self.used_fallback,
            latency: self.latency,
        }
    }
}

/// Outcome of a single attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    Failed(String),
}

/// One attempt against one candidate
#[derive(Debug, Clone)]
pub struct CallAttempt {
    pub provider: ProviderType,
    pub model: String,
    /// 1-based attempt number on this candidate
    pub attempt: u32,
    pub outcome: AttemptOutcome,
    pub elapsed: Duration,
}

impl CallAttempt {
    pub fn is_success(&self) -> bool {
        self.outcome == AttemptOutcome::Success
    }
}
