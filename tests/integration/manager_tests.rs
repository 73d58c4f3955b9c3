//! Manager failover tests

use crate::common::{CallScript, ScriptedProvider, manager_with, quiet_config, service};
use llm_failover::core::params::{GenerationParams, Setting};
use llm_failover::{
    HealthStatus, OperationKind, ProviderType, RouterError, SpeechRequest, TranscriptionRequest,
    user_message,
};
use std::time::Duration;

#[tokio::test]
async fn test_ranking_follows_health() {
    let gemini = ScriptedProvider::new(ProviderType::Gemini).build();
    let openai = ScriptedProvider::new(ProviderType::OpenAI).build();
    let claude = ScriptedProvider::new(ProviderType::Anthropic).build();

    let config = quiet_config().with_service(
        "chat",
        service("claude-3-5-sonnet", &["gpt-4o", "gemini-1.5-pro"]),
    );
    let manager = manager_with(config, &[gemini, openai, claude]);

    let health = manager.router().health();
    health.record_outcome(&ProviderType::Gemini, HealthStatus::Up, Some(120), None);
    health.record_outcome(&ProviderType::OpenAI, HealthStatus::Up, Some(300), None);

    assert_eq!(
        manager.ordered_providers(),
        vec![
            ProviderType::Gemini,
            ProviderType::OpenAI,
            ProviderType::Anthropic
        ]
    );

    let records = manager.provider_health(None).unwrap();
    let ranks: Vec<_> = records.iter().map(|r| r.priority_rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert_eq!(records[2].status, HealthStatus::Unknown);
    assert!(records[2].last_checked.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_primary_exhausts_then_fallback_answers() {
    let openai = ScriptedProvider::new(ProviderType::OpenAI)
        .with_calls(CallScript::Fail)
        .build();
    let claude = ScriptedProvider::new(ProviderType::Anthropic).build();

    let config = quiet_config().with_service(
        "chat",
        service("gpt-4o", &["claude-3-5-haiku"]).with_retries(3, 500),
    );
    let manager = manager_with(config, &[openai.clone(), claude.clone()]);

    let start = tokio::time::Instant::now();
    let reply = manager
        .chat("chat", &[user_message("hi")], &GenerationParams::default())
        .await
        .unwrap();

    assert_eq!(reply.result, "anthropic/claude-3-5-haiku: hi");
    assert_eq!(reply.provider, ProviderType::Anthropic);
    assert!(reply.used_fallback);
    assert_eq!(reply.attempts, 4);
    assert!(start.elapsed() >= Duration::from_millis(1_000));

    assert_eq!(openai.chat_count(), 3);
    assert_eq!(claude.chat_count(), 1);

    let openai_health = manager.provider_health(Some(&ProviderType::OpenAI)).unwrap();
    assert_eq!(openai_health[0].status, HealthStatus::Down);
    assert!(manager.router().health().is_healthy(&ProviderType::Anthropic));
}

#[tokio::test]
async fn test_unknown_service_touches_no_provider() {
    let openai = ScriptedProvider::new(ProviderType::OpenAI).build();
    let config = quiet_config().with_service("chat", service("gpt-4o", &[]));
    let manager = manager_with(config, &[openai.clone()]);

    let err = manager
        .chat("unknown_service", &[user_message("hi")], &GenerationParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RouterError::Configuration(_)));
    assert_eq!(openai.total_calls(), 0);
    assert_eq!(openai.probe_count(), 0);
    assert_eq!(
        manager.provider_health(Some(&ProviderType::OpenAI)).unwrap()[0].status,
        HealthStatus::Unknown
    );
}

#[tokio::test]
async fn test_speech_skips_provider_without_capability() {
    let claude = ScriptedProvider::new(ProviderType::Anthropic).build();
    let openai = ScriptedProvider::new(ProviderType::OpenAI).build();

    let config = quiet_config().with_service("tts", service("claude-3-haiku", &["tts-1"]));
    let manager = manager_with(config, &[claude.clone(), openai.clone()]);

    let request = SpeechRequest {
        input: "hello".to_string(),
        ..Default::default()
    };
    let audio = manager.synthesize_speech("tts", &request).await.unwrap();

    assert_eq!(audio.provider, ProviderType::OpenAI);
    assert_eq!(audio.attempts, 1);
    assert_eq!(&audio.result[..], b"openai/tts-1:hello");
    assert_eq!(claude.total_calls(), 0);
    assert_eq!(
        manager.provider_health(Some(&ProviderType::Anthropic)).unwrap()[0].status,
        HealthStatus::Unknown
    );
}

#[tokio::test]
async fn test_transcription_routes_to_capable_provider() {
    let gemini = ScriptedProvider::new(ProviderType::Gemini)
        .with_calls(CallScript::FailFirst(1))
        .build();
    let openai = ScriptedProvider::new(ProviderType::OpenAI).build();

    let config = quiet_config().with_service("stt", service("gemini-1.5-flash", &["whisper-1"]));
    let manager = manager_with(config, &[gemini.clone(), openai.clone()]);

    let request = TranscriptionRequest {
        audio: bytes::Bytes::from_static(&[0u8; 16]),
        mime_type: "audio/wav".to_string(),
        language: None,
    };
    let text = manager.transcribe("stt", &request).await.unwrap();

    // Gemini recovers on its second attempt, no failover needed
    assert_eq!(text.provider, ProviderType::Gemini);
    assert_eq!(text.attempts, 2);
    assert!(!text.used_fallback);
    assert_eq!(openai.total_calls(), 0);
}

#[tokio::test]
async fn test_all_candidates_exhausted() {
    let openai = ScriptedProvider::new(ProviderType::OpenAI)
        .with_calls(CallScript::Fail)
        .build();
    let gemini = ScriptedProvider::new(ProviderType::Gemini)
        .with_calls(CallScript::Fail)
        .build();

    let config = quiet_config().with_service(
        "chat",
        service("gpt-4o", &["gemini-1.5-pro"]).with_retries(2, 0),
    );
    let manager = manager_with(config, &[openai.clone(), gemini.clone()]);

    let err = manager
        .chat("chat", &[user_message("hi")], &GenerationParams::default())
        .await
        .unwrap_err();

    assert_eq!(err.attempted(), &[ProviderType::OpenAI, ProviderType::Gemini]);
    assert_eq!(err.last_error().unwrap().provider(), &ProviderType::Gemini);
    assert_eq!(openai.chat_count(), 2);
    assert_eq!(gemini.chat_count(), 2);

    let snapshot = manager.health_snapshot();
    assert_eq!(snapshot.down, 2);
    assert!(!snapshot.any_available());
}

#[tokio::test]
async fn test_credentials_rejection_retried_like_transient() {
    let openai = ScriptedProvider::new(ProviderType::OpenAI)
        .with_calls(CallScript::RejectCredentials)
        .build();
    let claude = ScriptedProvider::new(ProviderType::Anthropic).build();

    let config = quiet_config().with_service("chat", service("gpt-4o", &["claude-3-haiku"]));
    let manager = manager_with(config, &[openai.clone(), claude.clone()]);

    let reply = manager
        .chat("chat", &[user_message("hi")], &GenerationParams::default())
        .await
        .unwrap();

    assert_eq!(reply.provider, ProviderType::Anthropic);
    assert_eq!(openai.chat_count(), 3);
}

#[tokio::test]
async fn test_parameters_merge_per_field() {
    let openai = ScriptedProvider::new(ProviderType::OpenAI)
        .with_defaults(
            GenerationParams::default()
                .with_temperature(1.0)
                .with_top_p(0.9)
                .with_max_output_tokens(4096)
                .with_clean_response(true),
        )
        .build();

    let chat = service("gpt-4o", &[]).with_defaults(
        GenerationParams::default()
            .with_temperature(0.4)
            .with_response_schema(Setting::Value(serde_json::json!({"type": "object"}))),
    );
    let manager = manager_with(quiet_config().with_service("chat", chat), &[openai.clone()]);

    let call = GenerationParams::default()
        .with_max_output_tokens(256)
        .with_response_schema(Setting::Disabled);
    manager
        .chat("chat", &[user_message("hi")], &call)
        .await
        .unwrap();

    let params = openai.seen_params().pop().unwrap();
    assert_eq!(params.temperature, Some(0.4));
    assert_eq!(params.top_p, Some(0.9));
    assert_eq!(params.max_output_tokens, Some(256));
    assert_eq!(params.response_schema, None);
    assert!(params.should_clean());
}

#[tokio::test]
async fn test_execute_with_custom_operation() {
    let openai = ScriptedProvider::new(ProviderType::OpenAI).build();
    let manager = manager_with(
        quiet_config().with_service("chat", service("gpt-4o-mini", &[])),
        &[openai],
    );

    let result = manager
        .execute("chat", OperationKind::Text, |handle| async move {
            Ok(format!("{} {}", handle.model, handle.attempt))
        })
        .await
        .unwrap();

    assert_eq!(result.result, "gpt-4o-mini 1");
    assert_eq!(result.model, "gpt-4o-mini");
}

#[tokio::test]
async fn test_destroy_rejects_new_calls() {
    let openai = ScriptedProvider::new(ProviderType::OpenAI).build();
    let manager = manager_with(
        quiet_config().with_service("chat", service("gpt-4o", &[])),
        &[openai.clone()],
    );

    manager.destroy();
    manager.destroy();
    assert!(manager.is_destroyed());

    let err = manager
        .chat("chat", &[user_message("hi")], &GenerationParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RouterError::ManagerDestroyed));
    assert!(matches!(
        manager.provider_health(None),
        Err(RouterError::ManagerDestroyed)
    ));
    assert!(manager.ordered_providers().is_empty());
    assert_eq!(openai.total_calls(), 0);
}

#[tokio::test]
async fn test_provider_health_unknown_id() {
    let openai = ScriptedProvider::new(ProviderType::OpenAI).build();
    let manager = manager_with(
        quiet_config().with_service("chat", service("gpt-4o", &[])),
        &[openai],
    );

    let err = manager
        .provider_health(Some(&ProviderType::Gemini))
        .unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn test_primary_first_without_health_data() {
    let openai = ScriptedProvider::new(ProviderType::OpenAI).build();
    let claude = ScriptedProvider::new(ProviderType::Anthropic).build();

    let config = quiet_config()
        .with_service("a", service("claude-3-5-sonnet", &["gpt-4o"]))
        .with_service("b", service("gpt-4o", &["claude-3-5-sonnet"]));
    let manager = manager_with(config, &[openai.clone(), claude.clone()]);

    // Global order still lists every provider
    assert_eq!(
        manager.ordered_providers(),
        vec![ProviderType::Anthropic, ProviderType::OpenAI]
    );

    let reply = manager
        .chat("b", &[user_message("hi")], &GenerationParams::default())
        .await
        .unwrap();

    assert_eq!(reply.provider, ProviderType::OpenAI);
    assert!(!reply.used_fallback);
    assert_eq!(openai.chat_count(), 1);
    assert_eq!(claude.chat_count(), 0);
}
