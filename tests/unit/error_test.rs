//! Tests for error types

use project_hooks::core::{DeliveryError, SchedulerError, WebhookError};

#[test]
fn test_queue_full_error() {
    let err = SchedulerError::QueueFull("delivery".to_string());
    assert_eq!(format!("{}", err), "queue full: delivery");
}

#[test]
fn test_shut_down_error() {
    let err = SchedulerError::ShutDown("dispatch".to_string());
    assert_eq!(format!("{}", err), "pool shut down: dispatch");
}

#[test]
fn test_delivery_status_error() {
    let err = DeliveryError::Status {
        url: "http://hooks.example/in".to_string(),
        status: 503,
    };
    assert_eq!(format!("{}", err), "http://hooks.example/in answered with status 503");
}

#[test]
fn test_delivery_timeout_error() {
    let err = DeliveryError::Timeout {
        url: "http://hooks.example/in".to_string(),
    };
    assert_eq!(format!("{}", err), "delivery to http://hooks.example/in timed out");
}

#[test]
fn test_resource_not_found_error() {
    let err = WebhookError::ResourceNotFound {
        kind: "Project".to_string(),
        id: 42,
    };
    assert_eq!(format!("{}", err), "resource not found: Project 42");
}

#[test]
fn test_webhook_error_wraps_transparently() {
    let err: WebhookError = SchedulerError::QueueFull("delivery".to_string()).into();
    assert!(matches!(err, WebhookError::Submission(_)));
    assert_eq!(format!("{}", err), "queue full: delivery");

    let err: WebhookError = DeliveryError::Status {
        url: "http://x/".to_string(),
        status: 500,
    }
    .into();
    assert!(matches!(err, WebhookError::Delivery(_)));
}
