//! Request types shared by the router and provider implementations

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Kind of work a provider can be asked to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    /// Chat / text generation
    Text,
    /// Text to speech
    SpeechSynthesis,
    /// Speech to text
    SpeechRecognition,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Text,
        OperationKind::SpeechSynthesis,
        OperationKind::SpeechRecognition,
    ];
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Text => write!(f, "text"),
            OperationKind::SpeechSynthesis => write!(f, "speech-synthesis"),
            OperationKind::SpeechRecognition => write!(f, "speech-recognition"),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Text-to-speech request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Text to synthesize
    pub input: String,
    /// Vendor voice name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// Output audio format, e.g. `mp3`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Speech-to-text request
#[derive(Debug, Clone, Default)]
pub struct TranscriptionRequest {
    /// Encoded audio
    pub audio: Bytes,
    /// MIME type of `audio`, e.g. `audio/wav`
    pub mime_type: String,
    /// Optional ISO-639-1 language hint
    pub language: Option<String>,
}
