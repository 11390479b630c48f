//! Task execution traits and payload abstraction.

use std::fmt::Display;

use async_trait::async_trait;

use super::TaskMetadata;

/// Marker trait for task payloads.
///
/// Payloads cross from the submitting context into spawned tasks, so they
/// must be `Send + Sync + 'static`.
pub trait TaskPayload: Send + Sync + 'static {}

/// Blanket implementation: any type meeting the requirements is a `TaskPayload`.
impl<T> TaskPayload for T where T: Send + Sync + 'static {}

/// Abstraction for executing a task payload.
///
/// The executor carries the business logic of running one task. An `Err` is
/// not propagated anywhere: the pool logs it, counts it and records it in the
/// audit sink, then drops it.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use project_hooks::core::{TaskExecutor, TaskMetadata};
///
/// #[derive(Clone)]
/// struct Printer;
///
/// #[async_trait]
/// impl TaskExecutor<String> for Printer {
///     type Error = std::convert::Infallible;
///
///     async fn execute(&self, payload: String, _meta: TaskMetadata) -> Result<(), Self::Error> {
///         println!("{payload}");
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait TaskExecutor<P>: Send + Sync + Clone + 'static
where
    P: TaskPayload,
{
    /// Failure type reported to the pool's failure hook.
    type Error: Display + Send + 'static;

    /// Execute a task payload.
    ///
    /// # Arguments
    ///
    /// * `payload` - The task payload to execute
    /// * `meta` - Task metadata including ID, creation time and deadline
    async fn execute(&self, payload: P, meta: TaskMetadata) -> Result<(), Self::Error>;
}
