//! Webhook target records.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::WebhookError;
use crate::util::TargetId;

/// Longest accepted target comment, in characters.
pub const MAX_COMMENT_LEN: usize = 200;

/// A registered endpoint that receives creation notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookTarget {
    /// Registry-assigned identifier.
    pub id: TargetId,
    /// Absolute http(s) URL the notification is POSTed to.
    pub destination_url: Url,
    /// Opaque identifier of the owning principal.
    pub owner_ref: String,
    /// Optional note left by the owner.
    pub comment: String,
}

/// Validated fields for registering a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWebhookTarget {
    /// Absolute http(s) URL.
    pub destination_url: Url,
    /// Opaque identifier of the owning principal.
    pub owner_ref: String,
    /// Optional note, at most [`MAX_COMMENT_LEN`] characters.
    pub comment: String,
}

/// Raw registration request as received from a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetRequest {
    /// Destination URL as text.
    pub url: String,
    /// Optional note.
    #[serde(default)]
    pub comment: String,
}

impl NewWebhookTarget {
    /// Parse and bound the raw fields.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidTarget`] for a non-http(s) or malformed
    /// URL, an empty owner, or an over-long comment.
    pub fn parse(url: &str, owner_ref: impl Into<String>, comment: impl Into<String>) -> Result<Self, WebhookError> {
        let destination_url =
            Url::parse(url).map_err(|e| WebhookError::InvalidTarget(format!("`{url}`: {e}")))?;
        if !matches!(destination_url.scheme(), "http" | "https") {
            return Err(WebhookError::InvalidTarget(format!(
                "`{url}`: scheme must be http or https"
            )));
        }
        let owner_ref = owner_ref.into();
        if owner_ref.is_empty() {
            return Err(WebhookError::InvalidTarget("owner must not be empty".into()));
        }
        let comment = comment.into();
        if comment.chars().count() > MAX_COMMENT_LEN {
            return Err(WebhookError::InvalidTarget(format!(
                "comment longer than {MAX_COMMENT_LEN} characters"
            )));
        }
        Ok(Self {
            destination_url,
            owner_ref,
            comment,
        })
    }

    /// Attach the registry-assigned id.
    #[must_use]
    pub fn into_target(self, id: TargetId) -> WebhookTarget {
        WebhookTarget {
            id,
            destination_url: self.destination_url,
            owner_ref: self.owner_ref,
            comment: self.comment,
        }
    }
}
