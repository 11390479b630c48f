//! Entry point called by the resource-creation workflow.

use std::sync::Arc;

use crate::core::{SchedulerError, TaskStatus, TaskSubmitter};
use crate::model::ResourceCreatedEvent;
use crate::util::ResourceId;

/// Hands creation events to the dispatch pool.
#[derive(Clone)]
pub struct WebhookNotifier {
    dispatches: Arc<dyn TaskSubmitter<ResourceCreatedEvent>>,
}

impl WebhookNotifier {
    /// Create a notifier over a dispatch submitter.
    pub fn new(dispatches: Arc<dyn TaskSubmitter<ResourceCreatedEvent>>) -> Self {
        Self { dispatches }
    }

    /// Announce a committed creation. Call once, after commit.
    ///
    /// Returns as soon as the dispatch is scheduled; no delivery has been
    /// attempted yet.
    ///
    /// # Errors
    ///
    /// Returns the [`SchedulerError`] if the dispatch could not be
    /// scheduled. It is logged here; callers are expected to discard it.
    pub async fn notify_resource_created(
        &self,
        resource_kind: &str,
        resource_id: ResourceId,
    ) -> Result<TaskStatus, SchedulerError> {
        let event = ResourceCreatedEvent::new(resource_kind, resource_id);
        self.dispatches.submit(event).await.inspect_err(|e| {
            tracing::error!(
                kind = resource_kind,
                id = resource_id,
                error = %e,
                "resource-created notification not scheduled"
            );
        })
    }
}
