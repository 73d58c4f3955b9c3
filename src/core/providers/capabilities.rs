//! Provider classification and capability table
//!
//! `ProviderCapabilityResolver::classify` turns a configured model identifier
//! (and an optional endpoint) into exactly one provider identity. Precedence:
//!
//! 1. vendor-specific endpoint (Azure OpenAI deployment, Gemini API host)
//! 2. explicit `vendor/model` prefix naming a known provider
//! 3. case-insensitive model-name fragment match
//! 4. configured fallback vendor
//!
//! Capabilities of built-in vendors are static; custom providers are
//! registered explicitly.

use super::ProviderType;
use crate::config::ResolverSettings;
use crate::core::router::error::RouterError;
use crate::core::types::OperationKind;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static AZURE_ENDPOINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://[a-z0-9-]+\.(openai|cognitiveservices)\.azure\.com(/|$)")
        .expect("valid azure endpoint pattern")
});

static GEMINI_ENDPOINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://generativelanguage\.googleapis\.com(/|$)")
        .expect("valid gemini endpoint pattern")
});

/// Substrings that identify a vendor anywhere in the model name, checked in order
const ANTHROPIC_FRAGMENTS: &[&str] = &["claude"];
const GEMINI_FRAGMENTS: &[&str] = &["gemini", "gemma"];
const OPENAI_FRAGMENTS: &[&str] = &["gpt", "whisper", "dall-e"];

/// Prefixes that identify OpenAI models by name start (`o3-mini`, `tts-1-hd`, ...)
const OPENAI_PREFIXES: &[&str] = &["o1", "o3", "o4", "tts"];

/// Set of operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn with(self, kind: OperationKind) -> Self {
        Self(self.0 | bit(kind))
    }

    pub const fn contains(self, kind: OperationKind) -> bool {
        self.0 & bit(kind) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = OperationKind> {
        OperationKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

const fn bit(kind: OperationKind) -> u8 {
    match kind {
        OperationKind::Text => 1,
        OperationKind::SpeechSynthesis => 1 << 1,
        OperationKind::SpeechRecognition => 1 << 2,
    }
}

impl FromIterator<OperationKind> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = OperationKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CapabilitySet::empty(), |set, kind| set.with(kind))
    }
}

impl Serialize for CapabilitySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Static capability table for built-in vendors
pub fn builtin_capabilities(provider: &ProviderType) -> Option<CapabilitySet> {
    let text = CapabilitySet::empty().with(OperationKind::Text);
    match provider {
        ProviderType::OpenAI | ProviderType::Azure => Some(
            text.with(OperationKind::SpeechSynthesis)
                .with(OperationKind::SpeechRecognition),
        ),
        ProviderType::Gemini => Some(text.with(OperationKind::SpeechRecognition)),
        ProviderType::Anthropic => Some(text),
        ProviderType::Custom(_) => None,
    }
}

#[derive(Debug, Clone)]
struct CustomProvider {
    capabilities: CapabilitySet,
    model_fragments: Vec<String>,
}

/// Classifies model identifiers into providers and answers capability queries
#[derive(Debug, Clone)]
pub struct ProviderCapabilityResolver {
    fallback: ProviderType,
    custom: BTreeMap<String, CustomProvider>,
}

impl Default for ProviderCapabilityResolver {
    fn default() -> Self {
        Self::new(ProviderType::OpenAI)
    }
}

impl ProviderCapabilityResolver {
    /// Create a resolver that falls back to `fallback` when nothing matches
    pub fn new(fallback: ProviderType) -> Self {
        Self {
            fallback,
            custom: BTreeMap::new(),
        }
    }

    /// Build a resolver from configuration
    pub fn from_settings(settings: &ResolverSettings) -> Self {
        let mut resolver = Self::new(settings.fallback_provider.clone());
        for (name, custom) in &settings.custom_providers {
            resolver = resolver.with_custom_provider(
                name,
                custom.capabilities.iter().copied().collect(),
                custom.model_fragments.clone(),
            );
        }
        resolver
    }

    /// Register a custom provider (builder pattern)
    pub fn with_custom_provider(
        mut self,
        name: &str,
        capabilities: CapabilitySet,
        model_fragments: Vec<String>,
    ) -> Self {
        self.custom.insert(
            name.to_lowercase(),
            CustomProvider {
                capabilities,
                model_fragments: model_fragments
                    .into_iter()
                    .map(|f| f.to_lowercase())
                    .collect(),
            },
        );
        self
    }

    /// Vendor used when no rule matches
    pub fn fallback(&self) -> &ProviderType {
        &self.fallback
    }

    /// Classify a model identifier into exactly one provider
    pub fn classify(&self, model: &str, endpoint: Option<&str>) -> ProviderType {
        if let Some(provider) = endpoint.and_then(classify_endpoint) {
            return provider;
        }

        let model = model.trim().to_lowercase();

        if let Some((prefix, _)) = model.split_once('/') {
            let provider = ProviderType::from(prefix);
            if self.is_known(&provider) {
                return provider;
            }
        }

        if let Some(provider) = classify_fragment(&model) {
            return provider;
        }
        if OPENAI_PREFIXES.iter().any(|p| model.starts_with(p)) {
            return ProviderType::OpenAI;
        }

        for (name, custom) in &self.custom {
            if custom.model_fragments.iter().any(|f| model.contains(f.as_str())) {
                return ProviderType::Custom(name.clone());
            }
        }

        self.fallback.clone()
    }

    /// Capabilities of a provider
    ///
    /// Fails with a configuration error for a custom provider that was never
    /// registered.
    pub fn capabilities_of(&self, provider: &ProviderType) -> Result<CapabilitySet, RouterError> {
        if let Some(caps) = builtin_capabilities(provider) {
            return Ok(caps);
        }
        match provider {
            ProviderType::Custom(name) => self
                .custom
                .get(&name.to_lowercase())
                .map(|c| c.capabilities)
                .ok_or_else(|| {
                    RouterError::Configuration(format!("Unknown provider: {}", name))
                }),
            _ => Err(RouterError::Configuration(format!(
                "Unknown provider: {}",
                provider
            ))),
        }
    }

    fn is_known(&self, provider: &ProviderType) -> bool {
        match provider {
            ProviderType::Custom(name) => self.custom.contains_key(&name.to_lowercase()),
            _ => true,
        }
    }
}

fn classify_fragment(model: &str) -> Option<ProviderType> {
    let matches = |fragments: &[&str]| fragments.iter().any(|f| model.contains(f));
    if matches(ANTHROPIC_FRAGMENTS) {
        Some(ProviderType::Anthropic)
    } else if matches(GEMINI_FRAGMENTS) {
        Some(ProviderType::Gemini)
    } else if matches(OPENAI_FRAGMENTS) {
        Some(ProviderType::OpenAI)
    } else {
        None
    }
}

fn classify_endpoint(endpoint: &str) -> Option<ProviderType> {
    let endpoint = endpoint.trim();
    if AZURE_ENDPOINT.is_match(endpoint) {
        Some(ProviderType::Azure)
    } else if GEMINI_ENDPOINT.is_match(endpoint) {
        Some(ProviderType::Gemini)
    } else {
        None
    }
}
