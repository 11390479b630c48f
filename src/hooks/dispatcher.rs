//! Dispatcher: turns one creation event into one delivery task per target.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::delivery::DeliveryTask;
use super::payload::PayloadBuilder;
use crate::core::{TargetRegistry, TaskExecutor, TaskMetadata, TaskSubmitter, WebhookError};
use crate::model::ResourceCreatedEvent;

/// What one dispatch scheduled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Targets registered when the dispatch ran.
    pub targets: usize,
    /// Delivery tasks accepted by the fabric.
    pub submitted: usize,
    /// Delivery tasks the fabric refused.
    pub rejected: usize,
}

/// Fans a creation event out to every current target.
///
/// Only schedules work; it never waits on a delivery.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<dyn TargetRegistry>,
    payloads: PayloadBuilder,
    deliveries: Arc<dyn TaskSubmitter<DeliveryTask>>,
}

impl Dispatcher {
    /// Create a dispatcher.
    pub fn new(
        registry: Arc<dyn TargetRegistry>,
        payloads: PayloadBuilder,
        deliveries: Arc<dyn TaskSubmitter<DeliveryTask>>,
    ) -> Self {
        Self {
            registry,
            payloads,
            deliveries,
        }
    }

    /// Schedule one delivery per registered target.
    ///
    /// The payload is built once and shared. An empty registry is a no-op and
    /// skips the resource fetch. A refused submission is logged and counted
    /// in the report; it does not stop the remaining targets.
    ///
    /// # Errors
    ///
    /// Registry and store errors, and [`WebhookError::ResourceNotFound`] if
    /// the resource vanished before the payload was built.
    pub async fn on_resource_created(&self, event: &ResourceCreatedEvent) -> Result<DispatchReport, WebhookError> {
        let targets = self.registry.list_targets().await?;
        let mut report = DispatchReport {
            targets: targets.len(),
            ..DispatchReport::default()
        };
        if targets.is_empty() {
            tracing::debug!(
                kind = %event.resource_kind,
                id = event.resource_id,
                "no webhook targets registered"
            );
            return Ok(report);
        }

        let payload = Arc::new(
            self.payloads
                .build_payload(&event.resource_kind, event.resource_id)
                .await?,
        );

        for target in targets {
            let task = DeliveryTask::new(target.destination_url, Arc::clone(&payload));
            let delivery_id = task.delivery_id;
            match self.deliveries.submit(task).await {
                Ok(_) => report.submitted += 1,
                Err(e) => {
                    report.rejected += 1;
                    tracing::error!(
                        target_id = target.id,
                        delivery_id = %delivery_id,
                        error = %e,
                        "delivery task not scheduled"
                    );
                }
            }
        }

        tracing::info!(
            kind = %event.resource_kind,
            id = event.resource_id,
            targets = report.targets,
            submitted = report.submitted,
            rejected = report.rejected,
            "dispatched resource-created notifications"
        );
        Ok(report)
    }
}

#[async_trait]
impl TaskExecutor<ResourceCreatedEvent> for Dispatcher {
    type Error = WebhookError;

    async fn execute(&self, event: ResourceCreatedEvent, _meta: TaskMetadata) -> Result<(), WebhookError> {
        match self.on_resource_created(&event).await {
            Ok(_) => Ok(()),
            // Creation already committed; a vanished resource just means nothing to announce.
            Err(WebhookError::ResourceNotFound { kind, id }) => {
                tracing::debug!(%kind, id, "resource gone before dispatch, abandoning");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
