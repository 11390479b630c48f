//! Delivery worker: one POST of one payload to one target.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use url::Url;
use uuid::Uuid;

use super::payload::NotificationPayload;
use crate::config::DeliveryConfig;
use crate::core::{DeliveryError, TaskExecutor, TaskMetadata, WebhookError};

/// Media type of the notification body.
pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// Header carrying a per-attempt id targets may use to drop duplicates.
pub const DELIVERY_ID_HEADER: &str = "X-Webhook-Delivery";

/// Unit of work for one target.
#[derive(Debug, Clone)]
pub struct DeliveryTask {
    /// Sent as [`DELIVERY_ID_HEADER`].
    pub delivery_id: Uuid,
    /// Where the payload is POSTed.
    pub destination_url: Url,
    /// Shared, immutable payload of the dispatch.
    pub payload: Arc<NotificationPayload>,
}

impl DeliveryTask {
    /// New task with a fresh delivery id.
    #[must_use]
    pub fn new(destination_url: Url, payload: Arc<NotificationPayload>) -> Self {
        Self {
            delivery_id: Uuid::new_v4(),
            destination_url,
            payload,
        }
    }
}

/// Performs delivery attempts over a shared HTTP client.
///
/// Cloning is cheap; clones share the client's connection pool but no
/// per-delivery state.
#[derive(Debug, Clone)]
pub struct DeliveryWorker {
    client: Client,
    content_type: String,
}

impl DeliveryWorker {
    /// Build a worker from HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::ClientSetup`] if the HTTP client cannot be
    /// constructed (e.g. no TLS backend).
    pub fn new(config: &DeliveryConfig) -> Result<Self, WebhookError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| WebhookError::ClientSetup(e.to_string()))?;
        Ok(Self {
            client,
            content_type: config.content_type.clone(),
        })
    }

    /// POST the payload once. No retry.
    ///
    /// # Errors
    ///
    /// Any transport failure, timeout or non-2xx status becomes a
    /// [`DeliveryError`].
    pub async fn deliver(&self, task: &DeliveryTask) -> Result<StatusCode, DeliveryError> {
        let body = task.payload.to_bytes()?;
        let url = task.destination_url.as_str();
        let started = Instant::now();

        let response = self
            .client
            .post(task.destination_url.clone())
            .header(CONTENT_TYPE, self.content_type.as_str())
            .header(DELIVERY_ID_HEADER, task.delivery_id.to_string())
            .body(body)
            .send()
            .await
            .map_err(|e| DeliveryError::from_transport(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        tracing::debug!(
            url,
            delivery_id = %task.delivery_id,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis(),
            "webhook delivered"
        );
        Ok(status)
    }
}

#[async_trait]
impl TaskExecutor<DeliveryTask> for DeliveryWorker {
    type Error = DeliveryError;

    async fn execute(&self, task: DeliveryTask, _meta: TaskMetadata) -> Result<(), DeliveryError> {
        self.deliver(&task).await.map(|_| ())
    }
}
