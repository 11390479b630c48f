//! Bounded task pool and the core scheduling traits.
//!
//! A [`TaskPool`] runs submitted payloads on a [`Spawn`] implementation, never
//! on the caller's stack. At most `max_in_flight` tasks execute at once;
//! overflow waits in a bounded [`TaskQueue`] and is woken when a running task
//! releases its slot. Every task is bounded by `task_timeout`.
//!
//! Executor failures and panics are discarded here, in [`TaskPool`]'s
//! completion hook, after being logged, counted and audited. Submission
//! failures are returned to the caller and reported the same way.

use std::any::Any;
use std::future::Future;
use std::marker::PhantomData;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::stats::{PoolCounters, PoolStats};
use crate::core::{build_audit_event, AuditSink, SchedulerError, TaskExecutor, TaskPayload};
use crate::util::clock::now_ms;
use crate::util::ids::{new_task_id, TaskId};

/// Status of a task right after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is queued waiting for a free slot.
    Queued,
    /// Task was spawned immediately.
    Running,
}

/// Metadata describing a scheduled task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMetadata {
    /// Unique task identifier.
    pub id: TaskId,
    /// Creation timestamp in milliseconds since epoch.
    pub created_at_ms: u128,
    /// Absolute deadline for leaving the queue, in milliseconds since epoch.
    pub deadline_ms: Option<u128>,
}

impl TaskMetadata {
    /// Fresh metadata stamped with the current time and an optional TTL.
    #[must_use]
    pub fn new(ttl: Option<Duration>) -> Self {
        let now = now_ms();
        Self {
            id: new_task_id(),
            created_at_ms: now,
            deadline_ms: ttl.map(|ttl| now + ttl.as_millis()),
        }
    }

    /// Whether the queue deadline has passed.
    #[must_use]
    pub fn is_expired(&self, now_ms: u128) -> bool {
        self.deadline_ms.is_some_and(|d| now_ms > d)
    }
}

/// A schedulable task with metadata and payload.
#[derive(Debug, Clone)]
pub struct ScheduledTask<P> {
    /// Metadata driving scheduling decisions.
    pub meta: TaskMetadata,
    /// Task payload supplied by caller.
    pub payload: P,
}

/// Abstraction for queue backends.
pub trait TaskQueue<P> {
    /// Enqueue a task if space permits.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::QueueFull`] when the queue is at capacity.
    fn enqueue(&mut self, task: ScheduledTask<P>) -> Result<(), SchedulerError>;
    /// Dequeue the next task in submission order.
    fn dequeue(&mut self) -> Option<ScheduledTask<P>>;
    /// Remove expired tasks and return their metadata.
    fn prune_expired(&mut self, now_ms: u128) -> Vec<TaskMetadata>;
    /// Maximum depth allowed for this queue.
    fn max_depth(&self) -> usize;
    /// Current depth.
    fn len(&self) -> usize;
    /// Whether no task is waiting.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Abstraction for spawning task execution on a runtime.
pub trait Spawn {
    /// Spawn an async task that returns a future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// The one operation the webhook core needs from an execution fabric.
///
/// Dispatcher and notifier only see this trait, so the pool behind it can be
/// swapped for a remote queue without touching them.
#[async_trait]
pub trait TaskSubmitter<P>: Send + Sync
where
    P: TaskPayload,
{
    /// Hand a payload over for asynchronous execution.
    ///
    /// # Errors
    ///
    /// Returns a [`SchedulerError`] when the task could not be accepted.
    async fn submit(&self, payload: P) -> Result<TaskStatus, SchedulerError>;
}

/// Configuration values for capacity enforcement.
#[derive(Debug, Clone)]
pub struct PoolLimits {
    /// Maximum concurrently executing tasks.
    pub max_in_flight: u32,
    /// Maximum queued tasks.
    pub max_queue_depth: usize,
    /// Upper bound on a single task's execution.
    pub task_timeout: Duration,
    /// How long a task may wait in the queue before it is dropped.
    pub task_ttl: Option<Duration>,
}

struct PoolShared<P, Q, E, S> {
    name: String,
    limits: PoolLimits,
    /// Lock-free capacity tracking - number of running tasks.
    active: AtomicU32,
    queue: Mutex<Q>,
    accepting: AtomicBool,
    executor: E,
    spawner: S,
    audit: Option<Arc<dyn AuditSink>>,
    counters: PoolCounters,
    _payload_marker: PhantomData<fn() -> P>,
}

impl<P, Q, E, S> PoolShared<P, Q, E, S> {
    /// Try to reserve one slot atomically using a CAS loop.
    fn try_reserve(&self) -> bool {
        let mut current = self.active.load(Ordering::Acquire);
        loop {
            if current >= self.limits.max_in_flight {
                return false;
            }
            match self.active.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }

    fn release(&self) {
        self.active.fetch_sub(1, Ordering::Release);
    }

    fn record(&self, task_id: TaskId, action: &str, detail: Option<String>) {
        if let Some(audit) = &self.audit {
            audit.record(build_audit_event(
                format!("{task_id}-{action}-{}", now_ms()),
                task_id.to_string(),
                self.name.as_str(),
                action,
                detail,
            ));
        }
    }

    /// Account for queued tasks dropped past their TTL.
    fn expire(&self, expired: &[TaskMetadata]) {
        for meta in expired {
            PoolCounters::decr(&self.counters.queued);
            PoolCounters::incr(&self.counters.expired);
            tracing::warn!(pool = %self.name, task_id = %meta.id, "queued task expired before start");
            self.record(meta.id, "expire", None);
        }
    }

    fn reject(&self, task_id: TaskId, err: SchedulerError) -> SchedulerError {
        PoolCounters::incr(&self.counters.rejected);
        tracing::error!(
            pool = %self.name,
            task_id = %task_id,
            error = %err,
            "task submission rejected"
        );
        self.record(task_id, "reject", Some(err.to_string()));
        err
    }
}

/// Task pool with capacity accounting and queue overflow.
///
/// Uses a lock-free `AtomicU32` for the running-task count and a
/// `parking_lot::Mutex` around the queue. The pool is cheap to share behind an
/// `Arc`; all spawned tasks hold their own reference to the shared state.
pub struct TaskPool<P, Q, E, S> {
    shared: Arc<PoolShared<P, Q, E, S>>,
}

impl<P, Q, E, S> TaskPool<P, Q, E, S> {
    /// Create a new pool from components.
    pub fn new(name: impl Into<String>, limits: PoolLimits, queue: Q, executor: E, spawner: S) -> Self {
        Self {
            shared: Arc::new(PoolShared {
                name: name.into(),
                limits,
                active: AtomicU32::new(0),
                queue: Mutex::new(queue),
                accepting: AtomicBool::new(true),
                executor,
                spawner,
                audit: None,
                counters: PoolCounters::default(),
                _payload_marker: PhantomData,
            }),
        }
    }

    /// Attach an audit sink. Must be called before the first submission.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        if let Some(shared) = Arc::get_mut(&mut self.shared) {
            shared.audit = Some(audit);
        } else {
            tracing::warn!(pool = %self.shared.name, "audit sink ignored: pool already running tasks");
        }
        self
    }

    /// Pool name used in logs and audit events.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Configured limits.
    pub fn limits(&self) -> &PoolLimits {
        &self.shared.limits
    }

    /// Snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        self.shared.counters.snapshot()
    }

    /// Whether the pool still accepts submissions.
    pub fn is_accepting(&self) -> bool {
        self.shared.accepting.load(Ordering::Acquire)
    }

    /// Stop accepting new work. Running and queued tasks still finish.
    pub fn shutdown(&self) {
        if self.shared.accepting.swap(false, Ordering::AcqRel) {
            tracing::info!(pool = %self.shared.name, "pool shutting down");
        }
    }
}

impl<P, Q, E, S> TaskPool<P, Q, E, S>
where
    P: TaskPayload,
    Q: TaskQueue<P> + Send + 'static,
    E: TaskExecutor<P>,
    S: Spawn + Send + Sync + 'static,
{
    /// Submit a payload. Spawns it immediately if a slot is free, otherwise
    /// enqueues it.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::ShutDown`] after [`TaskPool::shutdown`] and
    /// [`SchedulerError::QueueFull`] when no slot and no queue space is left.
    pub fn submit_task(&self, payload: P) -> Result<TaskStatus, SchedulerError> {
        let shared = &self.shared;
        let meta = TaskMetadata::new(shared.limits.task_ttl);

        if !shared.accepting.load(Ordering::Acquire) {
            return Err(shared.reject(meta.id, SchedulerError::ShutDown(shared.name.clone())));
        }

        if shared.try_reserve() {
            PoolCounters::incr(&shared.counters.submitted);
            shared.record(meta.id, "start", None);
            tracing::debug!(pool = %shared.name, task_id = %meta.id, "task started immediately");
            Self::launch(shared, ScheduledTask { meta, payload });
            return Ok(TaskStatus::Running);
        }

        let task_id = meta.id;
        let (enqueued, expired) = {
            let mut queue = shared.queue.lock();
            // Stale entries must not hold queue space a fresh task could use.
            let expired = if queue.len() >= shared.limits.max_queue_depth {
                queue.prune_expired(now_ms())
            } else {
                Vec::new()
            };
            let enqueued = if queue.len() >= shared.limits.max_queue_depth {
                Err(SchedulerError::QueueFull(format!(
                    "{} (depth={})",
                    shared.name, shared.limits.max_queue_depth
                )))
            } else {
                queue.enqueue(ScheduledTask { meta, payload })
            };
            (enqueued, expired)
        };
        shared.expire(&expired);
        if let Err(e) = enqueued {
            return Err(shared.reject(task_id, e));
        }
        PoolCounters::incr(&shared.counters.submitted);
        PoolCounters::incr(&shared.counters.queued);
        shared.record(task_id, "enqueue", None);
        tracing::debug!(pool = %shared.name, task_id = %task_id, "task enqueued");

        // A slot may have been freed between the reservation attempt and the
        // enqueue; without this the task could wait for the next completion.
        Self::wake_next(shared);
        Ok(TaskStatus::Queued)
    }

    /// Drop queued tasks whose TTL has passed and return how many were
    /// dropped. Each one is counted and audited as expired.
    pub fn prune_expired(&self, now_ms: u128) -> usize {
        let expired = self.shared.queue.lock().prune_expired(now_ms);
        self.shared.expire(&expired);
        expired.len()
    }

    /// Spawn one task. The slot must already be reserved.
    fn launch(shared: &Arc<PoolShared<P, Q, E, S>>, task: ScheduledTask<P>) {
        let inner = Arc::clone(shared);
        shared.spawner.spawn(async move {
            let ScheduledTask { meta, payload } = task;
            let task_id = meta.id;
            PoolCounters::incr(&inner.counters.in_flight);

            // A panicking executor must still release its slot.
            let run = AssertUnwindSafe(inner.executor.execute(payload, meta)).catch_unwind();
            let outcome = tokio::time::timeout(inner.limits.task_timeout, run).await;

            PoolCounters::decr(&inner.counters.in_flight);
            match outcome {
                Ok(Ok(Ok(()))) => {
                    PoolCounters::incr(&inner.counters.completed);
                    tracing::debug!(pool = %inner.name, task_id = %task_id, "task completed");
                    inner.record(task_id, "complete", None);
                }
                Ok(Ok(Err(e))) => {
                    PoolCounters::incr(&inner.counters.failed);
                    tracing::warn!(pool = %inner.name, task_id = %task_id, error = %e, "task failed");
                    inner.record(task_id, "fail", Some(e.to_string()));
                }
                Ok(Err(panic)) => {
                    let message = panic_message(panic.as_ref());
                    PoolCounters::incr(&inner.counters.failed);
                    tracing::warn!(pool = %inner.name, task_id = %task_id, panic = %message, "task panicked");
                    inner.record(task_id, "fail", Some(format!("panicked: {message}")));
                }
                Err(_) => {
                    PoolCounters::incr(&inner.counters.timed_out);
                    tracing::warn!(
                        pool = %inner.name,
                        task_id = %task_id,
                        timeout_ms = inner.limits.task_timeout.as_millis(),
                        "task timed out"
                    );
                    inner.record(task_id, "timeout", None);
                }
            }

            inner.release();
            Self::wake_next(&inner);
        });
    }

    /// Start queued tasks while slots are free.
    fn wake_next(shared: &Arc<PoolShared<P, Q, E, S>>) {
        loop {
            if !shared.try_reserve() {
                break;
            }

            let next = shared.queue.lock().dequeue();
            let Some(task) = next else {
                shared.release();
                break;
            };

            if task.meta.is_expired(now_ms()) {
                shared.release();
                shared.expire(std::slice::from_ref(&task.meta));
                continue;
            }
            PoolCounters::decr(&shared.counters.queued);

            tracing::debug!(pool = %shared.name, task_id = %task.meta.id, "woke queued task");
            shared.record(task.meta.id, "start", None);
            Self::launch(shared, task);
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

#[async_trait]
impl<P, Q, E, S> TaskSubmitter<P> for TaskPool<P, Q, E, S>
where
    P: TaskPayload,
    Q: TaskQueue<P> + Send + 'static,
    E: TaskExecutor<P>,
    S: Spawn + Send + Sync + 'static,
{
    async fn submit(&self, payload: P) -> Result<TaskStatus, SchedulerError> {
        self.submit_task(payload)
    }
}
