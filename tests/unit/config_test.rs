//! Tests for configuration parsing and validation

use project_hooks::config::{DeliveryConfig, HooksConfig, PoolConfig};

fn pool(max_in_flight: u32, max_queue_depth: usize, task_timeout_secs: u64) -> PoolConfig {
    PoolConfig {
        max_in_flight,
        max_queue_depth,
        task_timeout_secs,
        task_ttl_secs: None,
    }
}

#[test]
fn test_pool_config_validation() {
    assert!(pool(4, 100, 10).validate().is_ok());
    assert!(pool(0, 100, 10).validate().is_err());
    assert!(pool(4, 0, 10).validate().is_err());
    assert!(pool(4, 100, 0).validate().is_err());

    let mut zero_ttl = pool(4, 100, 10);
    zero_ttl.task_ttl_secs = Some(0);
    assert!(zero_ttl.validate().is_err());
}

#[test]
fn test_delivery_config_defaults() {
    let http = DeliveryConfig::default();
    assert_eq!(http.request_timeout_ms, 5_000);
    assert_eq!(http.connect_timeout_ms, 2_000);
    assert_eq!(http.content_type, "application/vnd.api+json");
    assert!(http.user_agent.starts_with("project_hooks/"));
    assert!(http.validate().is_ok());
}

#[test]
fn test_delivery_config_rejects_zero_timeout() {
    let http = DeliveryConfig {
        request_timeout_ms: 0,
        ..DeliveryConfig::default()
    };
    assert!(http.validate().is_err());
}

#[test]
fn test_hooks_config_from_json() {
    let json = r#"{
        "dispatch": { "max_in_flight": 2, "max_queue_depth": 50, "task_timeout_secs": 30 },
        "delivery": { "max_in_flight": 16, "max_queue_depth": 500, "task_timeout_secs": 10, "task_ttl_secs": 120 },
        "http": { "request_timeout_ms": 3000 }
    }"#;

    let cfg = HooksConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.dispatch.max_in_flight, 2);
    assert_eq!(cfg.delivery.max_queue_depth, 500);
    assert_eq!(cfg.delivery.task_ttl_secs, Some(120));
    assert_eq!(cfg.http.request_timeout_ms, 3_000);
    // Unset http fields fall back to defaults
    assert_eq!(cfg.http.connect_timeout_ms, 2_000);
}

#[test]
fn test_hooks_config_request_timeout_bounded_by_task_timeout() {
    let json = r#"{
        "dispatch": { "max_in_flight": 2, "max_queue_depth": 50, "task_timeout_secs": 30 },
        "delivery": { "max_in_flight": 16, "max_queue_depth": 500, "task_timeout_secs": 1 },
        "http": { "request_timeout_ms": 5000 }
    }"#;

    let err = HooksConfig::from_json_str(json).unwrap_err();
    assert!(err.contains("request_timeout_ms"));
}

#[test]
fn test_hooks_config_parse_error() {
    let err = HooksConfig::from_json_str("{ not json").unwrap_err();
    assert!(err.starts_with("parse error"));
}

#[test]
fn test_hooks_config_invalid_pool_is_named() {
    let mut cfg = HooksConfig::default();
    cfg.delivery.max_in_flight = 0;
    let err = cfg.validate().unwrap_err();
    assert!(err.starts_with("delivery pool invalid"));
}
