//! Notification payloads and the builder that renders them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{ResourceStore, WebhookError};
use crate::model::{Attributes, Resource};
use crate::util::ResourceId;

/// Body POSTed to every target: `{"data": {"type", "id", "attributes"}}`.
///
/// Immutable once built; one instance is shared read-only by every delivery
/// of a dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    data: ResourceDocument,
}

/// The `data` member of a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDocument {
    #[serde(rename = "type")]
    kind: String,
    id: ResourceId,
    attributes: Attributes,
}

impl NotificationPayload {
    /// Assemble a payload from its parts.
    pub fn new(kind: impl Into<String>, id: ResourceId, attributes: Attributes) -> Self {
        Self {
            data: ResourceDocument {
                kind: kind.into(),
                id,
                attributes,
            },
        }
    }

    /// Snapshot a resource as it is right now.
    pub fn from_resource(resource: &dyn Resource) -> Self {
        Self::new(resource.kind(), resource.id(), resource.attributes())
    }

    /// Resource kind tag (`data.type`).
    pub fn kind(&self) -> &str {
        &self.data.kind
    }

    /// Resource id (`data.id`).
    pub const fn id(&self) -> ResourceId {
        self.data.id
    }

    /// Attribute snapshot (`data.attributes`).
    pub const fn attributes(&self) -> &Attributes {
        &self.data.attributes
    }

    /// Serialize to the wire body.
    ///
    /// # Errors
    ///
    /// Fails only if an attribute value cannot be encoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Renders payloads from the resource store.
#[derive(Clone)]
pub struct PayloadBuilder {
    store: Arc<dyn ResourceStore>,
}

impl PayloadBuilder {
    /// Create a builder over a store.
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    /// Re-fetch the resource and snapshot it.
    ///
    /// The resource is always loaded from the store, never taken from the
    /// caller, so the payload reflects the latest committed state.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::ResourceNotFound`] if the id no longer
    /// resolves, or the store's own error.
    pub async fn build_payload(&self, kind: &str, id: ResourceId) -> Result<NotificationPayload, WebhookError> {
        let resource = self
            .store
            .fetch_resource(kind, id)
            .await?
            .ok_or_else(|| WebhookError::ResourceNotFound {
                kind: kind.to_string(),
                id,
            })?;
        Ok(NotificationPayload::from_resource(resource.as_ref()))
    }
}
