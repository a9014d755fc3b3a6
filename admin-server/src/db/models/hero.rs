//! Hero Banner Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Promotional hero banner record
///
/// Exactly one image; no commerce fields. Same create/delete lifecycle as
/// products, no update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub title: String,
    pub button_text: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    /// Unix millis, set once by the repository
    #[serde(default)]
    pub created_at: i64,
}

/// Create hero payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroCreate {
    pub title: String,
    pub button_text: String,
    pub description: String,
    pub image: String,
}

impl Hero {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }

    /// Case-insensitive substring match over title and description
    pub fn matches_query(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
