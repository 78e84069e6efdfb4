//! Video host connector
//!
//! Direct uploads go from the admin's browser to the host; this service only creates
//! the upload session and later resolves the processed asset.

use crate::connectors::config::ConnectorConfig;
use crate::connectors::errors::ConnectorError;
use actix_web::web;
use std::sync::Arc;

pub mod client;
pub mod mock;
mod types;

pub use client::VideoServiceClient;
pub use types::{AssetInfo, PlaybackId, PollPolicy, UploadSession, UploadStatus};
pub(crate) use types::DataEnvelope;

#[async_trait::async_trait]
pub trait VideoServiceConnector: Send + Sync {
    /// Create a direct-upload session (public playback, basic quality)
    async fn create_upload(&self) -> Result<UploadSession, ConnectorError>;

    /// Current state of an upload job
    async fn get_upload(&self, upload_id: &str) -> Result<UploadStatus, ConnectorError>;

    /// Asset details, including playback ids
    async fn get_asset(&self, asset_id: &str) -> Result<AssetInfo, ConnectorError>;

    /// How long callers should wait for an upload to turn into an asset
    fn poll_policy(&self) -> PollPolicy {
        PollPolicy::default()
    }
}

/// Initialize the video connector from app settings
pub fn init(connector_config: &ConnectorConfig) -> web::Data<Arc<dyn VideoServiceConnector>> {
    let connector: Arc<dyn VideoServiceConnector> = if let Some(config) = connector_config
        .video_service
        .as_ref()
        .filter(|cfg| cfg.enabled)
    {
        let mut cfg = config.clone();
        cfg.load_credentials_from_env();

        match VideoServiceClient::new(cfg.clone()) {
            Ok(client) => {
                tracing::info!("Video service connector initialized ({})", cfg.base_url);
                Arc::new(client)
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    "Failed to initialize video service connector, falling back to mock"
                );
                Arc::new(mock::MockVideoServiceConnector::default())
            }
        }
    } else {
        tracing::warn!("Video service connector disabled - using mock responses");
        Arc::new(mock::MockVideoServiceConnector::default())
    };

    web::Data::new(connector)
}
