//! Generation parameters and their three-tier merge
//!
//! Every field resolves on its own: call value, else service default, else
//! provider default, else unset. A partial call override never hides the
//! other fields of the lower tiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Value that may be explicitly switched off at a higher tier
///
/// `Disabled` wins over lower tiers like any other value and resolves to
/// "unset". It is written as `null`, and an explicit `null` field reads back
/// as `Disabled`; an absent field means "inherit".
#[derive(Debug, Clone, PartialEq)]
pub enum Setting<T> {
    Disabled,
    Value(T),
}

impl<T> Setting<T> {
    pub fn into_value(self) -> Option<T> {
        match self {
            Setting::Disabled => None,
            Setting::Value(v) => Some(v),
        }
    }
}

impl<T> From<T> for Setting<T> {
    fn from(value: T) -> Self {
        Setting::Value(value)
    }
}

impl<T: Serialize> Serialize for Setting<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Setting::Disabled => serializer.serialize_none(),
            Setting::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Setting<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|v| v.map_or(Setting::Disabled, Setting::Value))
    }
}

/// Present field (including `null`) is `Some`; only a missing field is `None`
fn present_setting<'de, D, T>(deserializer: D) -> Result<Option<Setting<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Setting::deserialize(deserializer).map(Some)
}

/// Generation parameters at one tier (call, service or provider)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Nucleus sampling value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Whether the caller wants JSON-cleanup applied to text responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_response: Option<bool>,
    /// Structured-output JSON schema
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_setting"
    )]
    pub response_schema: Option<Setting<serde_json::Value>>,
    /// Structured-output MIME type, e.g. `application/json`
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_setting"
    )]
    pub response_mime_type: Option<Setting<String>>,
}

impl GenerationParams {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn with_clean_response(mut self, clean: bool) -> Self {
        self.clean_response = Some(clean);
        self
    }

    pub fn with_response_schema(mut self, schema: Setting<serde_json::Value>) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_response_mime_type(mut self, mime_type: Setting<String>) -> Self {
        self.response_mime_type = Some(mime_type);
        self
    }
}

/// Fully resolved parameters handed to a provider for one attempt
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EffectiveParams {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub clean_response: Option<bool>,
    pub response_schema: Option<serde_json::Value>,
    pub response_mime_type: Option<String>,
}

impl EffectiveParams {
    /// Merge call, service and provider tiers field by field
    pub fn resolve(
        call: &GenerationParams,
        service: &GenerationParams,
        provider: &GenerationParams,
    ) -> Self {
        Self {
            temperature: pick(&call.temperature, &service.temperature, &provider.temperature),
            top_p: pick(&call.top_p, &service.top_p, &provider.top_p),
            max_output_tokens: pick(
                &call.max_output_tokens,
                &service.max_output_tokens,
                &provider.max_output_tokens,
            ),
            clean_response: pick(
                &call.clean_response,
                &service.clean_response,
                &provider.clean_response,
            ),
            response_schema: pick(
                &call.response_schema,
                &service.response_schema,
                &provider.response_schema,
            )
            .and_then(Setting::into_value),
            response_mime_type: pick(
                &call.response_mime_type,
                &service.response_mime_type,
                &provider.response_mime_type,
            )
            .and_then(Setting::into_value),
        }
    }

    /// Cleaning is off unless some tier turned it on
    pub fn should_clean(&self) -> bool {
        self.clean_response.unwrap_or(false)
    }
}

fn pick<T: Clone>(call: &Option<T>, service: &Option<T>, provider: &Option<T>) -> Option<T> {
    call.as_ref()
        .or(service.as_ref())
        .or(provider.as_ref())
        .cloned()
}
