//! Provider identities and the provider collaborator interface
//!
//! Vendor-specific request shaping lives outside this crate. Everything the
//! router needs from a vendor backend is expressed by the [`Provider`] trait;
//! the router never looks at vendor-specific fields.

pub mod capabilities;
pub mod unified_provider;

use crate::core::params::{EffectiveParams, GenerationParams};
use crate::core::types::{ChatMessage, OperationKind, SpeechRequest, TranscriptionRequest};
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub use capabilities::{CapabilitySet, ProviderCapabilityResolver, builtin_capabilities};
pub use unified_provider::ProviderError;

/// Provider identity
///
/// The built-in vendors cover the OpenAI, Claude, Gemini and Azure API styles.
/// `Custom` keeps the set extensible; custom providers must have their
/// capabilities registered with the resolver before use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderType {
    OpenAI,
    Anthropic,
    Gemini,
    Azure,
    Custom(String),
}

impl ProviderType {
    /// Whether this is one of the built-in vendors
    pub fn is_builtin(&self) -> bool {
        !matches!(self, ProviderType::Custom(_))
    }

    /// Same identity with a custom name folded to lowercase
    pub fn normalized(&self) -> ProviderType {
        match self {
            ProviderType::Custom(name) => ProviderType::Custom(name.to_lowercase()),
            other => other.clone(),
        }
    }
}

impl From<&str> for ProviderType {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "openai" => ProviderType::OpenAI,
            "anthropic" | "claude" => ProviderType::Anthropic,
            "gemini" | "google" | "google-ai" => ProviderType::Gemini,
            "azure" | "azure-openai" | "azure_openai" => ProviderType::Azure,
            other => ProviderType::Custom(other.to_string()),
        }
    }
}

impl From<String> for ProviderType {
    fn from(s: String) -> Self {
        ProviderType::from(s.as_str())
    }
}

impl From<ProviderType> for String {
    fn from(provider: ProviderType) -> Self {
        provider.to_string()
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::OpenAI => write!(f, "openai"),
            ProviderType::Anthropic => write!(f, "anthropic"),
            ProviderType::Gemini => write!(f, "gemini"),
            ProviderType::Azure => write!(f, "azure"),
            ProviderType::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Vendor backend as seen by the router
///
/// Implementations own authentication, request formatting and response
/// parsing. Operations a vendor does not offer keep the default bodies, which
/// fail with [`ProviderError::NotSupported`].
#[async_trait]
pub trait Provider: Send + Sync {
    /// Identity of this provider
    fn provider_type(&self) -> ProviderType;

    /// Whether this provider instance can serve `kind`
    ///
    /// Defaults to the static capability table for built-in vendors. Custom
    /// providers answer `true` and rely on the capabilities registered with
    /// the resolver.
    fn supports(&self, kind: OperationKind) -> bool {
        builtin_capabilities(&self.provider_type()).is_none_or(|caps| caps.contains(kind))
    }

    /// Lowest-precedence generation parameters for this provider
    fn default_params(&self) -> GenerationParams {
        GenerationParams::default()
    }

    /// Run a chat completion and return the response text
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &EffectiveParams,
    ) -> Result<String, ProviderError>;

    /// Synthesize speech and return encoded audio
    async fn synthesize_speech(
        &self,
        _model: &str,
        _request: &SpeechRequest,
    ) -> Result<Bytes, ProviderError> {
        Err(ProviderError::not_supported(
            self.provider_type(),
            OperationKind::SpeechSynthesis,
        ))
    }

    /// Transcribe audio and return the recognized text
    async fn transcribe(
        &self,
        _model: &str,
        _request: &TranscriptionRequest,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::not_supported(
            self.provider_type(),
            OperationKind::SpeechRecognition,
        ))
    }

    /// Lightweight synthetic call, returns the observed response time in ms
    async fn probe_health(&self) -> Result<u64, ProviderError>;
}
