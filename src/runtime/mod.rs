//! Runtime adapters and the API surface used by the creation workflow.

pub mod api;
pub mod tokio_spawner;

pub use api::{create_project, health, list_webhooks, register_webhook, Health};
pub use tokio_spawner::TokioSpawner;
