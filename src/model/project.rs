//! Project records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::resource::{Attributes, Resource};
use crate::core::WebhookError;
use crate::util::ResourceId;

/// Type tag of project notifications.
pub const PROJECT_KIND: &str = "Project";

/// Longest accepted project name, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Longest accepted project description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Decimal places a rating is stored and delivered with.
pub const RATING_SCALE: u32 = 2;

/// A stored GitHub project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Store-assigned identifier.
    pub id: ResourceId,
    /// Display name.
    pub name: String,
    /// Free-form description; may be empty.
    pub description: String,
    /// Link to the repository on GitHub.
    pub url: String,
    /// Rating between 1 and 5 with two decimal places.
    pub rating: Decimal,
    /// Username of the owning principal.
    pub owner: String,
}

/// Fields supplied when creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    /// Display name.
    pub name: String,
    /// Free-form description; may be empty.
    #[serde(default)]
    pub description: String,
    /// Link to the repository on GitHub.
    pub url: String,
    /// Rating between 1 and 5 with two decimal places.
    pub rating: Decimal,
    /// Username of the owning principal.
    pub owner: String,
}

impl NewProject {
    /// Check the fields a project must satisfy before it is committed.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidResource`] for a blank or over-long
    /// name, an over-long description, a URL that is not a GitHub project,
    /// or a rating outside `1..=5` or with more than two decimal places.
    pub fn validate(&self) -> Result<(), WebhookError> {
        let invalid = |msg: String| Err(WebhookError::InvalidResource(msg));

        if self.name.trim().is_empty() {
            return invalid("name must not be blank".into());
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return invalid(format!("name exceeds {MAX_NAME_LEN} characters"));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return invalid(format!("description exceeds {MAX_DESCRIPTION_LEN} characters"));
        }
        if !is_github_project_url(&self.url) {
            return invalid(format!("`{}` is not a GitHub project URL", self.url));
        }
        if !(Decimal::ONE..=Decimal::from(5)).contains(&self.rating) {
            return invalid(format!("rating {} is outside 1..=5", self.rating));
        }
        if self.rating.normalize().scale() > RATING_SCALE {
            return invalid(format!("rating {} has more than {RATING_SCALE} decimal places", self.rating));
        }
        Ok(())
    }

    /// Attach the store-assigned id. The rating is stored at two decimal
    /// places, so `4.9` becomes `4.90`.
    #[must_use]
    pub fn into_project(self, id: ResourceId) -> Project {
        let mut rating = self.rating;
        rating.rescale(RATING_SCALE);
        Project {
            id,
            name: self.name,
            description: self.description,
            url: self.url,
            rating,
            owner: self.owner,
        }
    }
}

/// `http(s)://github.com/<owner>/<repo>...`
fn is_github_project_url(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };
    let segments = url
        .path_segments()
        .map_or(0, |segments| segments.filter(|s| !s.is_empty()).count());
    matches!(url.scheme(), "http" | "https") && url.host_str() == Some("github.com") && segments >= 2
}

impl Resource for Project {
    fn kind(&self) -> &str {
        PROJECT_KIND
    }

    fn id(&self) -> ResourceId {
        self.id
    }

    fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("name".into(), Value::String(self.name.clone()));
        attrs.insert("description".into(), Value::String(self.description.clone()));
        attrs.insert("url".into(), Value::String(self.url.clone()));
        attrs.insert("rating".into(), Value::String(self.rating.to_string()));
        attrs.insert("owner".into(), Value::String(self.owner.clone()));
        attrs
    }
}
