use super::{AssetInfo, PlaybackId, PollPolicy, UploadSession, UploadStatus, VideoServiceConnector};
use crate::connectors::errors::ConnectorError;
use async_trait::async_trait;
use std::time::Duration;

/// Stand-in used when the video host is disabled; every upload is immediately ready.
#[derive(Default)]
pub struct MockVideoServiceConnector;

#[async_trait]
impl VideoServiceConnector for MockVideoServiceConnector {
    async fn create_upload(&self) -> Result<UploadSession, ConnectorError> {
        let id = uuid::Uuid::new_v4().to_string();
        Ok(UploadSession {
            url: format!("http://localhost/mock-upload/{}", id),
            id,
        })
    }

    async fn get_upload(&self, upload_id: &str) -> Result<UploadStatus, ConnectorError> {
        Ok(UploadStatus {
            id: upload_id.to_string(),
            status: Some("asset_created".to_string()),
            asset_id: Some(format!("asset-{}", upload_id)),
        })
    }

    async fn get_asset(&self, asset_id: &str) -> Result<AssetInfo, ConnectorError> {
        Ok(AssetInfo {
            id: asset_id.to_string(),
            status: "ready".to_string(),
            playback_ids: vec![PlaybackId {
                id: format!("playback-{}", asset_id),
                policy: Some("public".to_string()),
            }],
            aspect_ratio: Some("16:9".to_string()),
            duration: Some(0.0),
        })
    }

    fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            attempts: 1,
            interval: Duration::ZERO,
        }
    }
}
