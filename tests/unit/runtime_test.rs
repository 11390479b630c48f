//! Tests for the tokio spawner and API operations

use std::sync::Arc;

use project_hooks::core::{SchedulerError, Spawn, TaskStatus, TaskSubmitter, WebhookError};
use project_hooks::hooks::WebhookNotifier;
use project_hooks::infra::{InMemoryProjectStore, InMemoryTargetRegistry};
use project_hooks::model::{NewProject, ResourceCreatedEvent, TargetRequest};
use project_hooks::runtime::{create_project, health, list_webhooks, register_webhook, TokioSpawner};
use rust_decimal::Decimal;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_spawn() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner.spawn(async move {
        tx.send(123).unwrap();
    });

    let result = rx.await.expect("oneshot result");
    assert_eq!(result, 123);
}

#[test]
fn test_health() {
    assert!(health().ok);
}

struct FailingSubmitter;

#[async_trait::async_trait]
impl TaskSubmitter<ResourceCreatedEvent> for FailingSubmitter {
    async fn submit(&self, _payload: ResourceCreatedEvent) -> Result<TaskStatus, SchedulerError> {
        Err(SchedulerError::ShutDown("dispatch".into()))
    }
}

fn new_project(rating: &str) -> NewProject {
    NewProject {
        name: "Project One".into(),
        description: String::new(),
        url: "https://github.com/testuser1/project1".into(),
        rating: rating.parse::<Decimal>().unwrap(),
        owner: "testuser1".into(),
    }
}

#[tokio::test]
async fn test_create_project_succeeds_when_notification_fails() {
    let store = InMemoryProjectStore::new();
    let notifier = WebhookNotifier::new(Arc::new(FailingSubmitter));

    let project = create_project(&store, &notifier, new_project("4.50")).await.unwrap();

    assert_eq!(project.id, 1);
    assert_eq!(store.get(project.id), Some(project));
}

#[tokio::test]
async fn test_create_project_rejects_out_of_range_rating() {
    let store = InMemoryProjectStore::new();
    let notifier = WebhookNotifier::new(Arc::new(FailingSubmitter));

    let err = create_project(&store, &notifier, new_project("7")).await.unwrap_err();

    assert!(matches!(err, WebhookError::InvalidResource(_)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_register_and_list_webhooks_per_owner() {
    let registry = InMemoryTargetRegistry::new();

    let first = register_webhook(
        &registry,
        "testuser1",
        TargetRequest {
            url: "https://hooks.example/one".into(),
            comment: "User 1 Webhook".into(),
        },
    )
    .unwrap();
    register_webhook(
        &registry,
        "testuser2",
        TargetRequest {
            url: "https://hooks.example/two".into(),
            comment: String::new(),
        },
    )
    .unwrap();

    let mine = list_webhooks(&registry, "testuser1").await.unwrap();
    assert_eq!(mine, vec![first]);
    assert_eq!(list_webhooks(&registry, "nobody").await.unwrap().len(), 0);
}

#[test]
fn test_register_webhook_rejects_bad_url() {
    let registry = InMemoryTargetRegistry::new();
    let err = register_webhook(
        &registry,
        "testuser1",
        TargetRequest {
            url: "ftp://hooks.example/in".into(),
            comment: String::new(),
        },
    )
    .unwrap_err();

    assert!(matches!(err, WebhookError::InvalidTarget(_)));
    assert!(registry.is_empty());
}
