use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lesson {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub video_asset_id: Option<Uuid>,
    /// Rich content blocks, stored as a JSON array.
    pub content: Option<serde_json::Value>,
    pub completed_by: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lesson as it appears inside a module outline.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LessonSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub completed_by: Vec<String>,
    pub playback_id: Option<String>,
}

impl Lesson {
    pub fn is_completed_by(&self, user_id: &str) -> bool {
        self.completed_by.iter().any(|id| id == user_id)
    }
}

impl LessonSummary {
    pub fn is_completed_by(&self, user_id: &str) -> bool {
        self.completed_by.iter().any(|id| id == user_id)
    }
}
