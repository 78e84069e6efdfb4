use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use uuid::Uuid;

/// Playable asset produced by the video host once an upload finished processing.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VideoAsset {
    pub id: Uuid,
    pub asset_id: String,
    pub playback_id: String,
    pub status: String,
    pub aspect_ratio: Option<String>,
    pub duration: Option<f64>,
    pub created_at: DateTime<Utc>,
}
