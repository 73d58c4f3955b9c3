//! Configuration loading tests

use crate::common::{ScriptedProvider, manager_with, quiet_config, service};
use llm_failover::core::params::GenerationParams;
use llm_failover::{
    FailoverError, ManagerConfig, Provider, ProviderManager, ProviderType, user_message,
};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const MANAGER_YAML: &str = r#"
health:
  enabled: false
resolver:
  custom_providers:
    local:
      capabilities: [text]
      model_fragments: [llama]
services:
  chat:
    primary_model: gpt-4o-mini
    fallback_models:
      - claude-3-5-haiku
      - llama-3.1-8b
    max_retries: 2
    retry_delay_ms: 0
  tts:
    primary_model: tts-1
    endpoint_override: https://contoso.openai.azure.com/openai/deployments/tts
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn providers() -> Vec<Arc<dyn Provider>> {
    [
        ProviderType::OpenAI,
        ProviderType::Anthropic,
        ProviderType::Azure,
        ProviderType::Custom("local".to_string()),
    ]
    .into_iter()
    .map(|id| ScriptedProvider::new(id).build() as Arc<dyn Provider>)
    .collect()
}

#[tokio::test]
async fn test_manager_from_yaml_file() {
    let file = write_config(MANAGER_YAML);

    let manager = ProviderManager::from_file(file.path(), providers())
        .await
        .unwrap();

    let chat = manager.router().profile("chat").unwrap();
    assert_eq!(chat.primary.provider, ProviderType::OpenAI);
    assert_eq!(
        chat.fallbacks
            .iter()
            .map(|t| t.provider.clone())
            .collect::<Vec<_>>(),
        vec![
            ProviderType::Anthropic,
            ProviderType::Custom("local".to_string())
        ]
    );
    assert_eq!(chat.retry.max_retries, 2);

    let tts = manager.router().profile("tts").unwrap();
    assert_eq!(tts.primary.provider, ProviderType::Azure);

    assert!(!manager.monitor().is_running());
    assert_eq!(manager.ordered_providers().len(), 4);
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProviderManager::from_file(dir.path().join("missing.yaml"), providers())
        .await
        .unwrap_err();
    assert!(matches!(err, FailoverError::Io(_)));
}

#[tokio::test]
async fn test_malformed_file_is_config_error() {
    let file = write_config("services:\n  chat: [1, 2]\n");
    let err = ManagerConfig::from_file(file.path()).await.unwrap_err();
    assert!(err.is_config());
}

#[tokio::test]
async fn test_unregistered_custom_provider_is_rejected() {
    let config = quiet_config().with_service("chat", service("gpt-4o", &[]));
    let providers: Vec<Arc<dyn Provider>> = vec![
        ScriptedProvider::new(ProviderType::OpenAI).build() as Arc<dyn Provider>,
        ScriptedProvider::new(ProviderType::Custom("mystery".to_string())).build() as Arc<dyn Provider>,
    ];

    let err = ProviderManager::new(&config, providers).unwrap_err();
    assert!(matches!(err, FailoverError::Router(_)));
    assert!(err.is_config());
}

#[tokio::test]
async fn test_primary_without_provider_is_rejected() {
    let config = quiet_config().with_service("chat", service("claude-3-opus", &[]));
    let err = ProviderManager::new(
        &config,
        vec![ScriptedProvider::new(ProviderType::OpenAI).build() as Arc<dyn Provider>],
    )
    .unwrap_err();
    assert!(err.to_string().contains("not instantiated"));
}

#[tokio::test]
async fn test_dropped_fallback_is_never_called() {
    let openai = ScriptedProvider::new(ProviderType::OpenAI)
        .with_calls(crate::common::CallScript::Fail)
        .build();
    let config = quiet_config().with_service("chat", service("gpt-4o", &["gemini-1.5-pro"]));
    let manager = manager_with(config, &[openai]);

    assert!(manager.router().profile("chat").unwrap().fallbacks.is_empty());

    let err = manager
        .chat("chat", &[user_message("hi")], &GenerationParams::default())
        .await
        .unwrap_err();
    assert_eq!(err.attempted(), &[ProviderType::OpenAI]);
}

#[tokio::test]
async fn test_custom_provider_serves_as_fallback() {
    let file = write_config(MANAGER_YAML);
    let config = ManagerConfig::from_file(file.path()).await.unwrap();

    let openai = ScriptedProvider::new(ProviderType::OpenAI)
        .with_calls(crate::common::CallScript::Fail)
        .build();
    let claude = ScriptedProvider::new(ProviderType::Anthropic)
        .with_calls(crate::common::CallScript::Fail)
        .build();
    let azure = ScriptedProvider::new(ProviderType::Azure).build();
    let local = ScriptedProvider::new(ProviderType::Custom("local".to_string())).build();
    let manager = manager_with(config, &[openai, claude, azure, local.clone()]);

    let reply = manager
        .chat("chat", &[user_message("hi")], &GenerationParams::default())
        .await
        .unwrap();

    assert_eq!(reply.provider, ProviderType::Custom("local".to_string()));
    assert_eq!(reply.result, "local/llama-3.1-8b: hi");
    assert_eq!(reply.attempts, 5);
    assert_eq!(local.chat_count(), 1);
}
