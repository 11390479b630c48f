//! API-facing operations: create projects, register webhooks, inspect health.

use serde::{Deserialize, Serialize};

use crate::core::{ProjectStore, TargetRegistry, WebhookError};
use crate::hooks::WebhookNotifier;
use crate::infra::InMemoryTargetRegistry;
use crate::model::{NewProject, NewWebhookTarget, Project, TargetRequest, WebhookTarget, PROJECT_KIND};

/// Health response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Validate and commit a project, then announce it.
///
/// Once the commit succeeds the result no longer depends on webhooks: a
/// notification that cannot be scheduled is logged by the notifier and
/// otherwise ignored.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidResource`] when the fields are rejected, or
/// the store's error when the commit fails. No notification is sent then.
pub async fn create_project(
    store: &dyn ProjectStore,
    notifier: &WebhookNotifier,
    new: NewProject,
) -> Result<Project, WebhookError> {
    new.validate()?;
    let project = store.insert_project(new).await?;
    tracing::info!(id = project.id, name = %project.name, "project created");

    // Delivery outcome never affects creation.
    let _ = notifier.notify_resource_created(PROJECT_KIND, project.id).await;
    Ok(project)
}

/// Register a webhook target for `owner`.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidTarget`] for a malformed URL or an
/// over-long comment.
pub fn register_webhook(
    registry: &InMemoryTargetRegistry,
    owner: &str,
    request: TargetRequest,
) -> Result<WebhookTarget, WebhookError> {
    let target = NewWebhookTarget::parse(&request.url, owner, request.comment)?;
    Ok(registry.register(target))
}

/// Targets visible to `owner`. Other principals' targets are never listed.
///
/// # Errors
///
/// Propagates registry errors.
pub async fn list_webhooks(registry: &dyn TargetRegistry, owner: &str) -> Result<Vec<WebhookTarget>, WebhookError> {
    registry.targets_for_owner(owner).await
}

/// Return a health payload.
#[must_use]
pub const fn health() -> Health {
    Health { ok: true }
}
