//! Concurrent calls against one manager

use crate::common::{CallScript, ScriptedProvider, manager_with, quiet_config, service};
use llm_failover::core::params::GenerationParams;
use llm_failover::{ProviderType, user_message};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_keep_ranking_consistent() {
    let openai = ScriptedProvider::new(ProviderType::OpenAI)
        .with_calls(CallScript::FailEvery(3))
        .with_call_delay(Duration::from_millis(1))
        .build();
    let claude = ScriptedProvider::new(ProviderType::Anthropic)
        .with_calls(CallScript::FailEvery(5))
        .build();
    let gemini = ScriptedProvider::new(ProviderType::Gemini).build();

    let config = quiet_config().with_service(
        "chat",
        service("gpt-4o", &["claude-3-haiku", "gemini-1.5-flash"]).with_retries(1, 0),
    );
    let manager = Arc::new(manager_with(
        config,
        &[openai.clone(), claude.clone(), gemini.clone()],
    ));

    let mut tasks = Vec::new();
    for worker in 0..8 {
        let manager = manager.clone();
        tasks.push(tokio::spawn(async move {
            for i in 0..25 {
                let prompt = format!("worker {} call {}", worker, i);
                let reply = manager
                    .chat("chat", &[user_message(prompt)], &GenerationParams::default())
                    .await;
                assert!(reply.is_ok(), "gemini never fails, so no call can be exhausted");

                let ordered = manager.ordered_providers();
                let unique: HashSet<_> = ordered.iter().collect();
                assert_eq!(ordered.len(), 3);
                assert_eq!(unique.len(), 3);
            }
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }

    let records = manager.provider_health(None).unwrap();
    let ranks: Vec<_> = records.iter().map(|r| r.priority_rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert!(openai.chat_count() + claude.chat_count() + gemini.chat_count() >= 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_destroy_during_calls() {
    let openai = ScriptedProvider::new(ProviderType::OpenAI)
        .with_call_delay(Duration::from_millis(20))
        .build();
    let manager = Arc::new(manager_with(
        quiet_config().with_service("chat", service("gpt-4o", &[])),
        &[openai.clone()],
    ));

    let in_flight = {
        let manager = manager.clone();
        tokio::spawn(async move {
            manager
                .chat("chat", &[user_message("slow")], &GenerationParams::default())
                .await
        })
    };

    tokio::time::sleep(Duration::from_millis(5)).await;
    manager.destroy();

    // The call that started before teardown completes normally
    let reply = in_flight.await.unwrap().unwrap();
    assert_eq!(reply.provider, ProviderType::OpenAI);

    // Its late health write hits an empty registry
    assert!(manager.ordered_providers().is_empty());
}
