//! In-memory target registry.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::core::{TargetRegistry, WebhookError};
use crate::model::{NewWebhookTarget, WebhookTarget};
use crate::util::TargetId;

/// Registry holding targets in a map, for development and tests.
pub struct InMemoryTargetRegistry {
    targets: RwLock<BTreeMap<TargetId, WebhookTarget>>,
    next_id: AtomicU64,
}

impl InMemoryTargetRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            targets: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store a target and assign its id.
    pub fn register(&self, target: NewWebhookTarget) -> WebhookTarget {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let target = target.into_target(id);
        self.targets.write().insert(id, target.clone());
        tracing::info!(target_id = id, url = %target.destination_url, "webhook target registered");
        target
    }

    /// Remove a target. Returns whether it existed.
    pub fn remove(&self, id: TargetId) -> bool {
        let removed = self.targets.write().remove(&id).is_some();
        if removed {
            tracing::info!(target_id = id, "webhook target removed");
        }
        removed
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.read().len()
    }

    /// Whether no target is registered.
    pub fn is_empty(&self) -> bool {
        self.targets.read().is_empty()
    }
}

impl Default for InMemoryTargetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TargetRegistry for InMemoryTargetRegistry {
    async fn list_targets(&self) -> Result<Vec<WebhookTarget>, WebhookError> {
        Ok(self.targets.read().values().cloned().collect())
    }

    async fn targets_for_owner(&self, owner_ref: &str) -> Result<Vec<WebhookTarget>, WebhookError> {
        Ok(self
            .targets
            .read()
            .values()
            .filter(|t| t.owner_ref == owner_ref)
            .cloned()
            .collect())
    }
}
