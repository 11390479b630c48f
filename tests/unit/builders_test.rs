//! Tests for the pipeline builder

use std::sync::Arc;

use project_hooks::builders::PipelineBuilder;
use project_hooks::config::HooksConfig;
use project_hooks::core::WebhookError;
use project_hooks::infra::{InMemoryProjectStore, InMemoryTargetRegistry};
use project_hooks::runtime::TokioSpawner;

#[tokio::test]
async fn test_build_pipeline_with_defaults() {
    let pipeline = PipelineBuilder::new(HooksConfig::default(), TokioSpawner::current())
        .registry(Arc::new(InMemoryTargetRegistry::new()))
        .store(Arc::new(InMemoryProjectStore::new()))
        .build()
        .unwrap();

    assert_eq!(pipeline.dispatch_pool().name(), "dispatch");
    assert_eq!(pipeline.delivery_pool().name(), "delivery");
    assert!(pipeline.dispatch_pool().is_accepting());
    assert_eq!(pipeline.stats().delivery.submitted, 0);
}

#[tokio::test]
async fn test_build_requires_registry() {
    let result = PipelineBuilder::new(HooksConfig::default(), TokioSpawner::current())
        .store(Arc::new(InMemoryProjectStore::new()))
        .build();

    assert!(matches!(result, Err(WebhookError::Config(msg)) if msg.contains("registry")));
}

#[tokio::test]
async fn test_build_requires_store() {
    let result = PipelineBuilder::new(HooksConfig::default(), TokioSpawner::current())
        .registry(Arc::new(InMemoryTargetRegistry::new()))
        .build();

    assert!(matches!(result, Err(WebhookError::Config(msg)) if msg.contains("store")));
}

#[tokio::test]
async fn test_build_rejects_invalid_config() {
    let mut config = HooksConfig::default();
    config.dispatch.max_queue_depth = 0;

    let result = PipelineBuilder::new(config, TokioSpawner::current())
        .registry(Arc::new(InMemoryTargetRegistry::new()))
        .store(Arc::new(InMemoryProjectStore::new()))
        .build();

    assert!(matches!(result, Err(WebhookError::Config(_))));
}

#[tokio::test]
async fn test_shutdown_stops_both_pools() {
    let pipeline = PipelineBuilder::new(HooksConfig::default(), TokioSpawner::current())
        .registry(Arc::new(InMemoryTargetRegistry::new()))
        .store(Arc::new(InMemoryProjectStore::new()))
        .build()
        .unwrap();

    pipeline.shutdown();

    assert!(!pipeline.dispatch_pool().is_accepting());
    assert!(!pipeline.delivery_pool().is_accepting());
    assert!(pipeline.notifier().notify_resource_created("Project", 1).await.is_err());
    assert_eq!(pipeline.stats().dispatch.rejected, 1);
}
