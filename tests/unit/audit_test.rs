//! Tests for audit sinks

use project_hooks::core::{build_audit_event, AuditSink, InMemoryAuditSink};

#[test]
fn test_in_memory_audit_sink_records_events() {
    let sink = InMemoryAuditSink::new(10);
    let event = build_audit_event("evt1", "task1", "delivery", "fail", Some("refused".into()));

    sink.record(event);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_id, "evt1");
    assert_eq!(events[0].task_id, "task1");
    assert_eq!(events[0].pool, "delivery");
    assert_eq!(events[0].action, "fail");
    assert_eq!(events[0].detail.as_deref(), Some("refused"));
}

#[test]
fn test_in_memory_audit_sink_is_bounded() {
    let sink = InMemoryAuditSink::new(3);
    for i in 0..5 {
        sink.record(build_audit_event(format!("evt{i}"), "task", "dispatch", "start", None));
    }

    let events = sink.events();
    assert_eq!(events.len(), 3);
    // Oldest events are evicted first
    assert_eq!(events[0].event_id, "evt2");
    assert_eq!(events[2].event_id, "evt4");
}

#[test]
fn test_events_with_action_filters() {
    let sink = InMemoryAuditSink::new(10);
    sink.record(build_audit_event("a", "t1", "delivery", "start", None));
    sink.record(build_audit_event("b", "t1", "delivery", "fail", Some("503".into())));
    sink.record(build_audit_event("c", "t2", "delivery", "complete", None));

    let fails = sink.events_with_action("fail");
    assert_eq!(fails.len(), 1);
    assert_eq!(fails[0].event_id, "b");
    assert!(sink.events_with_action("expire").is_empty());
}
