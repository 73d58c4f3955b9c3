//! Provider resolver configuration

use crate::core::providers::ProviderType;
use crate::core::types::OperationKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Vendor chosen when no classification rule matches
    #[serde(default = "default_fallback_provider")]
    pub fallback_provider: ProviderType,
    /// Custom providers keyed by name
    #[serde(default)]
    pub custom_providers: BTreeMap<String, CustomProviderSettings>,
}

fn default_fallback_provider() -> ProviderType {
    ProviderType::OpenAI
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            fallback_provider: default_fallback_provider(),
            custom_providers: BTreeMap::new(),
        }
    }
}

/// A provider outside the built-in vendor set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomProviderSettings {
    /// Operations the provider can serve
    pub capabilities: Vec<OperationKind>,
    /// Lowercase substrings identifying its models
    #[serde(default)]
    pub model_fragments: Vec<String>,
}
