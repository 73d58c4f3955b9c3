//! # llm-failover
//!
//! Failover routing and health ranking for LLM, text-to-speech and
//! speech-to-text providers.
//!
//! ## Features
//!
//! - **Service profiles**: per-service primary model, ordered fallbacks and retry policy
//! - **Capability filtering**: candidates that cannot serve an operation are skipped
//! - **Health ranking**: background probes and live call outcomes reorder candidates
//! - **Bounded retries**: fixed delay between attempts, then failover to the next candidate
//! - **Per-field parameter merge**: call overrides, service defaults, provider defaults
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llm_failover::{ManagerConfig, ProviderManager, ServiceConfig, user_message};
//! use llm_failover::core::params::GenerationParams;
//! # use llm_failover::core::providers::Provider;
//! # use std::sync::Arc;
//!
//! # async fn run(providers: Vec<Arc<dyn Provider>>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = ManagerConfig::default().with_service(
//!     "chat",
//!     ServiceConfig::new("gpt-4o-mini").with_fallback_model("claude-3-5-haiku"),
//! );
//! let manager = ProviderManager::new(&config, providers)?;
//!
//! let reply = manager
//!     .chat("chat", &[user_message("Hello!")], &GenerationParams::default())
//!     .await?;
//! println!("{} answered: {}", reply.provider, reply.result);
//!
//! manager.destroy();
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod manager;
pub mod utils;

// Re-export main types
pub use config::{ManagerConfig, ServiceConfig};
pub use core::health::{HealthRegistry, HealthSnapshot, HealthStatus, ProviderRecord};
pub use core::providers::{Provider, ProviderError, ProviderType};
pub use core::router::{CandidateHandle, ExecutionResult, RouterError};
pub use core::types::{ChatMessage, OperationKind, SpeechRequest, TranscriptionRequest};
pub use manager::ProviderManager;
pub use utils::error::{FailoverError, Result};

/// Create a user message
pub fn user_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::user(content)
}

/// Create a system message
pub fn system_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::system(content)
}
