//! Service configuration

use super::*;
use crate::core::params::GenerationParams;
use crate::core::providers::ProviderType;
use serde::{Deserialize, Serialize};

/// One service key's routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Default model; its classification picks the primary provider
    pub primary_model: String,
    /// Secondary models in priority order
    #[serde(default)]
    pub fallback_models: Vec<FallbackModel>,
    /// Attempts per candidate
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Fixed delay between attempts on the same candidate
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Upper bound for one attempt
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
    /// Retry authentication failures on the same candidate
    #[serde(default = "default_true")]
    pub retry_auth_errors: bool,
    /// Generation defaults for this service
    #[serde(default)]
    pub defaults: GenerationParams,
    /// Endpoint that forces the primary vendor, e.g. an Azure deployment URL
    #[serde(default)]
    pub endpoint_override: Option<String>,
}

impl ServiceConfig {
    pub fn new(primary_model: impl Into<String>) -> Self {
        Self {
            primary_model: primary_model.into(),
            fallback_models: Vec::new(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_ms: None,
            retry_auth_errors: true,
            defaults: GenerationParams::default(),
            endpoint_override: None,
        }
    }

    /// Append a fallback classified from its model name
    pub fn with_fallback_model(self, model: impl Into<String>) -> Self {
        self.with_fallback(FallbackModel::new(None, model))
    }

    pub fn with_fallback(mut self, fallback: FallbackModel) -> Self {
        self.fallback_models.push(fallback);
        self
    }

    pub fn with_retries(mut self, max_retries: u32, retry_delay_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_defaults(mut self, defaults: GenerationParams) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_endpoint_override(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint_override = Some(endpoint.into());
        self
    }
}

/// A fallback entry
///
/// Written either as a bare model string or as `{provider, model}` when the
/// provider should not be inferred from the model name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FallbackModelRepr")]
pub struct FallbackModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderType>,
    pub model: String,
}

impl FallbackModel {
    pub fn new(provider: Option<ProviderType>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FallbackModelRepr {
    Model(String),
    Explicit {
        #[serde(default)]
        provider: Option<ProviderType>,
        model: String,
    },
}

impl From<FallbackModelRepr> for FallbackModel {
    fn from(repr: FallbackModelRepr) -> Self {
        match repr {
            FallbackModelRepr::Model(model) => FallbackModel::new(None, model),
            FallbackModelRepr::Explicit { provider, model } => FallbackModel::new(provider, model),
        }
    }
}
