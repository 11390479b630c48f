//! Records the webhook core reads: resources, events and targets.

pub mod project;
pub mod resource;
pub mod target;

pub use project::{NewProject, Project, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, PROJECT_KIND, RATING_SCALE};
pub use resource::{Attributes, Resource, ResourceCreatedEvent};
pub use target::{NewWebhookTarget, TargetRequest, WebhookTarget, MAX_COMMENT_LEN};
