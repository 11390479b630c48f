//! Identifier types shared across the pipeline.

use uuid::Uuid;

/// Identifier of a task submitted to a pool.
pub type TaskId = Uuid;

/// Identifier of a stored resource (e.g. a project row).
pub type ResourceId = i64;

/// Identifier of a registered webhook target.
pub type TargetId = u64;

/// Generate a fresh task identifier.
#[must_use]
pub fn new_task_id() -> TaskId {
    Uuid::new_v4()
}
