use serde::{Deserialize, Serialize};

/// Configuration for external service connectors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    pub video_service: Option<VideoServiceConfig>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            video_service: Some(VideoServiceConfig::default()),
        }
    }
}

/// Video host (direct uploads + asset lookup) connector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoServiceConfig {
    /// Enable/disable the video host integration; disabled means the mock connector
    pub enabled: bool,
    /// API base URL (e.g., https://api.mux.com)
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// How many times an upload job is polled before giving up
    #[serde(default = "VideoServiceConfig::default_poll_attempts")]
    pub poll_attempts: u32,
    /// Delay between two polls of the same upload job
    #[serde(default = "VideoServiceConfig::default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Access token id (from env: VIDEO_TOKEN_ID)
    #[serde(skip)]
    pub token_id: Option<String>,
    /// Access token secret (from env: VIDEO_TOKEN_SECRET)
    #[serde(skip)]
    pub token_secret: Option<String>,
}

impl VideoServiceConfig {
    const fn default_poll_attempts() -> u32 {
        15
    }

    const fn default_poll_interval_ms() -> u64 {
        2_000
    }

    pub fn load_credentials_from_env(&mut self) {
        if self.token_id.is_none() {
            self.token_id = std::env::var("VIDEO_TOKEN_ID").ok();
        }
        if self.token_secret.is_none() {
            self.token_secret = std::env::var("VIDEO_TOKEN_SECRET").ok();
        }
    }
}

impl Default for VideoServiceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.mux.com".to_string(),
            timeout_secs: 10,
            poll_attempts: Self::default_poll_attempts(),
            poll_interval_ms: Self::default_poll_interval_ms(),
            token_id: None,
            token_secret: None,
        }
    }
}
