//! Tests for utility functions

use project_hooks::util::clock::now_ms;
use project_hooks::util::ids::new_task_id;

#[test]
fn test_now_ms_is_monotonic_enough() {
    let a = now_ms();
    let b = now_ms();
    assert!(b >= a);
    assert!(a > 1_600_000_000_000);
}

#[test]
fn test_task_ids_are_unique() {
    let a = new_task_id();
    let b = new_task_id();
    assert_ne!(a, b);
    assert_eq!(a.get_version_num(), 4);
}
