use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Direct-upload target handed to the admin client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadSession {
    pub id: String,
    pub url: String,
}

/// Upload job state; `asset_id` appears once the host has created the asset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadStatus {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub asset_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackId {
    pub id: String,
    #[serde(default)]
    pub policy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetInfo {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub playback_ids: Vec<PlaybackId>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl AssetInfo {
    /// First playback id, or an empty string when the host has not assigned one.
    pub fn primary_playback_id(&self) -> String {
        self.playback_ids
            .first()
            .map(|playback| playback.id.clone())
            .unwrap_or_default()
    }
}

/// The host wraps every payload in `{"data": ...}`
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Bounded polling of an upload job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            attempts: 15,
            interval: Duration::from_millis(2_000),
        }
    }
}
