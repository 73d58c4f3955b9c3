//! Execution implementation for Router
//!
//! This module contains `execute` and `execute_with_params`: sequential
//! failover across candidates with bounded, fixed-delay retries per candidate.

use super::error::RouterError;
use super::fallback::{AttemptOutcome, CallAttempt, ExecutionResult};
use super::router::Router;
use crate::core::health::HealthStatus;
use crate::core::params::{EffectiveParams, GenerationParams};
use crate::core::providers::{Provider, ProviderError, ProviderType};
use crate::core::types::OperationKind;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Everything an operation needs to run one attempt against one candidate
#[derive(Clone)]
pub struct CandidateHandle {
    pub provider_type: ProviderType,
    pub provider: Arc<dyn Provider>,
    pub model: String,
    /// Parameters merged from the call, the service and the provider
    pub params: EffectiveParams,
    /// 1-based attempt number on this candidate
    pub attempt: u32,
}

impl std::fmt::Debug for CandidateHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateHandle")
            .field("provider_type", &self.provider_type)
            .field("model", &self.model)
            .field("params", &self.params)
            .field("attempt", &self.attempt)
            .finish()
    }
}

impl Router {
    /// Execute an operation for a service with retry and failover
    pub async fn execute<T, F, Fut>(
        &self,
        service: &str,
        kind: OperationKind,
        operation: F,
    ) -> Result<ExecutionResult<T>, RouterError>
    where
        F: Fn(CandidateHandle) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        self.execute_with_params(service, kind, &GenerationParams::default(), operation)
            .await
    }

    /// Execute with per-call parameter overrides
    ///
    /// The flow:
    /// 1. Resolve the service profile (unknown key fails before any provider is touched)
    /// 2. Build the capability-filtered candidate list, ordered by live health
    /// 3. Try each candidate up to `max_retries` times with a fixed delay in between
    /// 4. Report each candidate's final outcome to the health registry
    pub async fn execute_with_params<T, F, Fut>(
        &self,
        service: &str,
        kind: OperationKind,
        call_params: &GenerationParams,
        operation: F,
    ) -> Result<ExecutionResult<T>, RouterError>
    where
        F: Fn(CandidateHandle) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let start = Instant::now();

        let profile = self
            .profile(service)
            .ok_or_else(|| RouterError::Configuration(format!("Unknown service: {}", service)))?;

        let candidates = self.ordered_candidates(profile, kind);
        debug!(
            "Service '{}' ({}): candidates [{}]",
            service,
            kind,
            candidates
                .iter()
                .map(|c| c.provider.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let policy = &profile.retry;
        let max_attempts = policy.attempts();

        let mut attempted = Vec::with_capacity(candidates.len());
        let mut attempts = Vec::new();
        let mut last_error: Option<ProviderError> = None;

        for target in candidates {
            let Some(provider) = self.provider(&target.provider) else {
                continue;
            };
            let params = EffectiveParams::resolve(call_params, &profile.defaults, &provider.default_params());

            let mut candidate_error: Option<ProviderError> = None;
            let mut unsupported = false;

            for attempt in 1..=max_attempts {
                let handle = CandidateHandle {
                    provider_type: target.provider.clone(),
                    provider: provider.clone(),
                    model: target.model.clone(),
                    params: params.clone(),
                    attempt,
                };

                let attempt_start = Instant::now();
                let outcome = match policy.request_timeout {
                    Some(limit) => match tokio::time::timeout(limit, operation(handle)).await {
                        Ok(outcome) => outcome,
                        Err(_) => Err(ProviderError::timeout(
                            target.provider.clone(),
                            limit.as_millis() as u64,
                        )),
                    },
                    None => operation(handle).await,
                };
                let elapsed = attempt_start.elapsed();

                match outcome {
                    Ok(value) => {
                        attempts.push(CallAttempt {
                            provider: target.provider.clone(),
                            model: target.model.clone(),
                            attempt,
                            outcome: AttemptOutcome::Success,
                            elapsed,
                        });
                        self.health.record_outcome(
                            &target.provider,
                            HealthStatus::Up,
                            Some(elapsed.as_millis() as u64),
                            None,
                        );

                        let used_fallback = target.provider != profile.primary.provider;
                        if used_fallback {
                            info!(
                                "Service '{}' served by fallback {} ({})",
                                service, target.provider, target.model
                            );
                        }

                        return Ok(ExecutionResult {
                            result: value,
                            provider: target.provider,
                            model: target.model,
                            attempts: attempts.len() as u32,
                            used_fallback,
                            latency: start.elapsed(),
                        });
                    }
                    Err(err) => {
                        debug!(
                            "Attempt {}/{} on {} for '{}' failed: {}",
                            attempt, max_attempts, target.provider, service, err
                        );
                        attempts.push(CallAttempt {
                            provider: target.provider.clone(),
                            model: target.model.clone(),
                            attempt,
                            outcome: AttemptOutcome::Failed(err.to_string()),
                            elapsed,
                        });

                        if err.is_not_supported() {
                            unsupported = true;
                            break;
                        }

                        let retry = attempt < max_attempts
                            && err.is_retryable()
                            && (policy.retry_auth_errors || !err.is_authentication());
                        candidate_error = Some(err);

                        if !retry {
                            break;
                        }
                        tokio::time::sleep(policy.retry_delay).await;
                    }
                }
            }

            match candidate_error {
                Some(err) => {
                    warn!(
                        "Provider {} exhausted for service '{}', failing over: {}",
                        target.provider, service, err
                    );
                    self.health.record_outcome(
                        &target.provider,
                        HealthStatus::Down,
                        None,
                        Some(err.to_string()),
                    );
                    attempted.push(target.provider);
                    last_error = Some(err);
                }
                None if unsupported => {
                    debug!("{} does not support {}, skipping", target.provider, kind);
                }
                None => {}
            }
        }

        error!(
            "All providers exhausted for service '{}' after {} attempts",
            service,
            attempts.len()
        );

        Err(RouterError::AllProvidersExhausted {
            service: service.to_string(),
            operation: kind,
            last_error,
            attempted,
            attempts,
        })
    }
}
