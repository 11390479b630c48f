//! Wires registry, store, spawner and configuration into running pools.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::HooksConfig;
use crate::core::{AuditSink, PoolStats, ResourceStore, Spawn, TargetRegistry, TaskPool, WebhookError};
use crate::hooks::{DeliveryTask, DeliveryWorker, Dispatcher, PayloadBuilder, WebhookNotifier};
use crate::infra::InMemoryQueue;
use crate::model::ResourceCreatedEvent;

/// Pool name used for delivery attempts.
pub const DELIVERY_POOL: &str = "delivery";
/// Pool name used for dispatches.
pub const DISPATCH_POOL: &str = "dispatch";

/// Pool running delivery attempts.
pub type DeliveryPool<S> = TaskPool<DeliveryTask, InMemoryQueue<DeliveryTask>, DeliveryWorker, S>;

/// Pool running dispatches.
pub type DispatchPool<S> = TaskPool<ResourceCreatedEvent, InMemoryQueue<ResourceCreatedEvent>, Dispatcher, S>;

/// Counters of both pools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Dispatch pool counters.
    pub dispatch: PoolStats,
    /// Delivery pool counters.
    pub delivery: PoolStats,
}

/// A running pipeline: notifier plus the two pools behind it.
pub struct WebhookPipeline<S> {
    notifier: WebhookNotifier,
    dispatch_pool: Arc<DispatchPool<S>>,
    delivery_pool: Arc<DeliveryPool<S>>,
}

impl<S> WebhookPipeline<S> {
    /// Handle for the resource-creation workflow.
    pub const fn notifier(&self) -> &WebhookNotifier {
        &self.notifier
    }

    /// The dispatch pool.
    pub const fn dispatch_pool(&self) -> &Arc<DispatchPool<S>> {
        &self.dispatch_pool
    }

    /// The delivery pool.
    pub const fn delivery_pool(&self) -> &Arc<DeliveryPool<S>> {
        &self.delivery_pool
    }

    /// Snapshot of both pools.
    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            dispatch: self.dispatch_pool.stats(),
            delivery: self.delivery_pool.stats(),
        }
    }

    /// Stop accepting dispatches, then deliveries. In-flight work finishes.
    pub fn shutdown(&self) {
        self.dispatch_pool.shutdown();
        self.delivery_pool.shutdown();
    }
}

/// Builder for [`WebhookPipeline`].
pub struct PipelineBuilder<S> {
    config: HooksConfig,
    spawner: S,
    registry: Option<Arc<dyn TargetRegistry>>,
    store: Option<Arc<dyn ResourceStore>>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl<S> PipelineBuilder<S>
where
    S: Spawn + Clone + Send + Sync + 'static,
{
    /// Start from a configuration and a spawner shared by both pools.
    pub fn new(config: HooksConfig, spawner: S) -> Self {
        Self {
            config,
            spawner,
            registry: None,
            store: None,
            audit: None,
        }
    }

    /// Configuration being built.
    pub const fn config(&self) -> &HooksConfig {
        &self.config
    }

    /// Source of webhook targets.
    #[must_use]
    pub fn registry(mut self, registry: Arc<dyn TargetRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Source of resources for payloads.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn ResourceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Audit sink shared by both pools.
    #[must_use]
    pub fn audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Validate the configuration and start the pools.
    ///
    /// # Errors
    ///
    /// [`WebhookError::Config`] for an invalid configuration or a missing
    /// registry/store, [`WebhookError::ClientSetup`] if the HTTP client
    /// cannot be built.
    pub fn build(self) -> Result<WebhookPipeline<S>, WebhookError> {
        self.config.validate().map_err(WebhookError::Config)?;
        let registry = self
            .registry
            .ok_or_else(|| WebhookError::Config("target registry not set".into()))?;
        let store = self
            .store
            .ok_or_else(|| WebhookError::Config("resource store not set".into()))?;

        let worker = DeliveryWorker::new(&self.config.http)?;
        let mut delivery_pool = TaskPool::new(
            DELIVERY_POOL,
            self.config.delivery.limits(),
            InMemoryQueue::new(self.config.delivery.max_queue_depth),
            worker,
            self.spawner.clone(),
        );
        if let Some(audit) = &self.audit {
            delivery_pool = delivery_pool.with_audit(Arc::clone(audit));
        }
        let delivery_pool = Arc::new(delivery_pool);

        let dispatcher = Dispatcher::new(registry, PayloadBuilder::new(store), delivery_pool.clone());
        let mut dispatch_pool = TaskPool::new(
            DISPATCH_POOL,
            self.config.dispatch.limits(),
            InMemoryQueue::new(self.config.dispatch.max_queue_depth),
            dispatcher,
            self.spawner,
        );
        if let Some(audit) = self.audit {
            dispatch_pool = dispatch_pool.with_audit(audit);
        }
        let dispatch_pool = Arc::new(dispatch_pool);

        tracing::info!(
            dispatch_in_flight = self.config.dispatch.max_in_flight,
            delivery_in_flight = self.config.delivery.max_in_flight,
            request_timeout_ms = self.config.http.request_timeout_ms,
            "webhook pipeline started"
        );

        Ok(WebhookPipeline {
            notifier: WebhookNotifier::new(dispatch_pool.clone()),
            dispatch_pool,
            delivery_pool,
        })
    }
}
