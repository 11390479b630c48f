//! Core scheduling abstractions, the execution fabric and error types.

pub mod audit;
pub mod error;
pub mod executor;
pub mod ports;
pub mod stats;
pub mod task_pool;

pub use audit::{build_audit_event, AuditEvent, AuditSink, InMemoryAuditSink};
pub use error::{AppResult, DeliveryError, SchedulerError, WebhookError};
pub use executor::{TaskExecutor, TaskPayload};
pub use ports::{ProjectStore, ResourceStore, TargetRegistry};
pub use stats::PoolStats;
pub use task_pool::{
    PoolLimits, ScheduledTask, Spawn, TaskMetadata, TaskPool, TaskQueue, TaskStatus, TaskSubmitter,
};
