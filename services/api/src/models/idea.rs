//! Idea models for the API service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{normalize_tags, required_text};

/// Stored idea
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated idea content, ready to be inserted or to replace an existing record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaDraft {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Body accepted by both create and update
///
/// `tags` is kept loose: clients send either a comma-delimited string or an
/// array of strings.
#[derive(Debug, Default, Deserialize)]
pub struct IdeaRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<serde_json::Value>,
}

impl IdeaRequest {
    /// Returns `None` when title, summary or description is missing or blank.
    pub fn into_draft(self) -> Option<IdeaDraft> {
        let title = required_text(self.title.as_deref())?;
        let summary = required_text(self.summary.as_deref())?;
        let description = required_text(self.description.as_deref())?;

        Some(IdeaDraft {
            title,
            summary,
            description,
            tags: normalize_tags(self.tags.as_ref()),
        })
    }
}
