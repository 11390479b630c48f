//! In-memory project store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::core::{ProjectStore, ResourceStore, WebhookError};
use crate::model::{NewProject, Project, Resource, PROJECT_KIND};
use crate::util::ResourceId;

/// Project table kept in memory. Writes are visible to readers as soon as the
/// call returns, which stands in for a committed transaction.
pub struct InMemoryProjectStore {
    projects: RwLock<BTreeMap<ResourceId, Project>>,
    next_id: AtomicI64,
}

impl InMemoryProjectStore {
    /// Create an empty store. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Insert a project and return the committed row.
    pub fn insert(&self, new: NewProject) -> Project {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let project = new.into_project(id);
        self.projects.write().insert(id, project.clone());
        project
    }

    /// Replace a stored project. Returns `false` if the id is unknown.
    pub fn update(&self, project: Project) -> bool {
        let mut projects = self.projects.write();
        match projects.get_mut(&project.id) {
            Some(slot) => {
                *slot = project;
                true
            }
            None => false,
        }
    }

    /// Delete a project. Returns whether it existed.
    pub fn delete(&self, id: ResourceId) -> bool {
        self.projects.write().remove(&id).is_some()
    }

    /// Current state of one project.
    pub fn get(&self, id: ResourceId) -> Option<Project> {
        self.projects.read().get(&id).cloned()
    }

    /// Number of stored projects.
    pub fn len(&self) -> usize {
        self.projects.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.projects.read().is_empty()
    }
}

impl Default for InMemoryProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceStore for InMemoryProjectStore {
    async fn fetch_resource(&self, kind: &str, id: ResourceId) -> Result<Option<Box<dyn Resource>>, WebhookError> {
        if kind != PROJECT_KIND {
            return Err(WebhookError::UnsupportedKind(kind.to_string()));
        }
        Ok(self.get(id).map(|p| Box::new(p) as Box<dyn Resource>))
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn insert_project(&self, new: NewProject) -> Result<Project, WebhookError> {
        Ok(self.insert(new))
    }
}
