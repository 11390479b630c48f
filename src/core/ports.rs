//! Interfaces to the collaborators the webhook core consumes.
//!
//! The registry and resource store are read-only from the core's point of
//! view; implementations must tolerate concurrent calls from many dispatches.
//! [`ProjectStore`] is the write side used by the creation workflow.

use async_trait::async_trait;

use crate::core::WebhookError;
use crate::model::{NewProject, Project, Resource, WebhookTarget};
use crate::util::ResourceId;

/// Source of registered webhook targets.
#[async_trait]
pub trait TargetRegistry: Send + Sync {
    /// Every target registered right now. No pagination.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Registry`] when the backing store is unreachable.
    async fn list_targets(&self) -> Result<Vec<WebhookTarget>, WebhookError>;

    /// Targets owned by one principal.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Registry`] when the backing store is unreachable.
    async fn targets_for_owner(&self, owner_ref: &str) -> Result<Vec<WebhookTarget>, WebhookError>;
}

/// Lookup of committed resources by kind and id.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Latest committed state of a resource, or `None` if it no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::UnsupportedKind`] for kinds the store does not
    /// hold and [`WebhookError::Store`] when the store is unreachable.
    async fn fetch_resource(&self, kind: &str, id: ResourceId) -> Result<Option<Box<dyn Resource>>, WebhookError>;
}

/// Commit side of the project table.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Commit a validated project and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Store`] when the write fails.
    async fn insert_project(&self, new: NewProject) -> Result<Project, WebhookError>;
}
