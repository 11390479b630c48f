//! Webhook fan-out: payload building, dispatch and delivery.

pub mod delivery;
pub mod dispatcher;
pub mod notifier;
pub mod payload;

pub use delivery::{DeliveryTask, DeliveryWorker, DELIVERY_ID_HEADER, JSON_API_CONTENT_TYPE};
pub use dispatcher::{DispatchReport, Dispatcher};
pub use notifier::WebhookNotifier;
pub use payload::{NotificationPayload, PayloadBuilder, ResourceDocument};
