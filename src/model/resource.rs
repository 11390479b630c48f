//! Resource abstraction and the creation event.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::util::ResourceId;

/// Field name to value snapshot rendered into a notification.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// A stored record that can be announced to webhook targets.
pub trait Resource: Debug + Send + Sync {
    /// Type tag written to `data.type`, e.g. `"Project"`.
    fn kind(&self) -> &str;

    /// Identifier written to `data.id`.
    fn id(&self) -> ResourceId;

    /// Attribute snapshot written to `data.attributes`.
    ///
    /// Decimal values must be rendered as their canonical fixed-point string.
    fn attributes(&self) -> Attributes;
}

/// Emitted once per committed resource creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCreatedEvent {
    /// Type tag of the created resource.
    pub resource_kind: String,
    /// Identifier of the created resource.
    pub resource_id: ResourceId,
}

impl ResourceCreatedEvent {
    /// Build an event for `kind`/`id`.
    pub fn new(resource_kind: impl Into<String>, resource_id: ResourceId) -> Self {
        Self {
            resource_kind: resource_kind.into(),
            resource_id,
        }
    }
}
