//! Error types for the fabric, the delivery worker and the webhook core.

use thiserror::Error;

use crate::util::ResourceId;

/// Errors produced when a task cannot be handed to a pool.
///
/// These indicate systemic trouble (saturation, shutdown), never a bad target.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Queue is full for the target pool.
    #[error("queue full: {0}")]
    QueueFull(String),
    /// Pool no longer accepts work.
    #[error("pool shut down: {0}")]
    ShutDown(String),
}

/// Outcome of a single failed delivery attempt.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The request did not complete within the configured timeout.
    #[error("delivery to {url} timed out")]
    Timeout {
        /// Destination URL.
        url: String,
    },
    /// Connection refused, DNS failure or TLS failure.
    #[error("could not connect to {url}: {message}")]
    Connect {
        /// Destination URL.
        url: String,
        /// Underlying transport message.
        message: String,
    },
    /// Target answered with a non-2xx status.
    #[error("{url} answered with status {status}")]
    Status {
        /// Destination URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// Any other transport failure.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Destination URL.
        url: String,
        /// Underlying transport message.
        message: String,
    },
    /// Payload could not be encoded.
    #[error("payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl DeliveryError {
    /// Classify a transport error from the HTTP client.
    pub(crate) fn from_transport(url: &str, err: &reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_timeout() {
            Self::Timeout { url }
        } else if err.is_connect() {
            Self::Connect {
                url,
                message: err.to_string(),
            }
        } else {
            Self::Network {
                url,
                message: err.to_string(),
            }
        }
    }
}

/// Errors raised by the webhook core and the collaborators it consumes.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Resource vanished between creation and payload build.
    #[error("resource not found: {kind} {id}")]
    ResourceNotFound {
        /// Resource kind tag.
        kind: String,
        /// Resource identifier.
        id: ResourceId,
    },
    /// Resource fields rejected before commit.
    #[error("invalid resource: {0}")]
    InvalidResource(String),
    /// The resource store does not know this kind.
    #[error("unsupported resource kind: {0}")]
    UnsupportedKind(String),
    /// Target could not be registered.
    #[error("invalid webhook target: {0}")]
    InvalidTarget(String),
    /// Target registry could not be read.
    #[error("target registry unavailable: {0}")]
    Registry(String),
    /// Resource store could not be read or written.
    #[error("resource store unavailable: {0}")]
    Store(String),
    /// HTTP client could not be constructed.
    #[error("http client setup failed: {0}")]
    ClientSetup(String),
    /// Configuration rejected.
    #[error("config invalid: {0}")]
    Config(String),
    /// A delivery attempt failed.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    /// A task could not be submitted.
    #[error(transparent)]
    Submission(#[from] SchedulerError),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
