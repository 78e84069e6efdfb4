use crate::connectors::{AssetInfo, VideoServiceConnector};
use crate::services::ServiceError;

pub use crate::connectors::video_service::PollPolicy;

/// Wait for an uploaded file to become an asset on the video host.
///
/// The upload job is polled at `policy.interval`; once it reports an asset id the asset
/// itself is fetched. Exhausting `policy.attempts` yields [`ServiceError::Timeout`].
#[tracing::instrument(name = "Await video asset.", skip(connector))]
pub async fn await_video_asset(
    connector: &dyn VideoServiceConnector,
    upload_id: &str,
    policy: PollPolicy,
) -> Result<AssetInfo, ServiceError> {
    for attempt in 1..=policy.attempts.max(1) {
        let upload = connector.get_upload(upload_id).await?;

        if upload.status.as_deref() == Some("errored") {
            return Err(ServiceError::Upstream(format!(
                "video upload {} failed on the host",
                upload_id
            )));
        }

        if let Some(asset_id) = upload.asset_id.filter(|id| !id.is_empty()) {
            tracing::debug!("Upload {} produced asset {} after {} poll(s)", upload_id, asset_id, attempt);
            return Ok(connector.get_asset(&asset_id).await?);
        }

        if attempt < policy.attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }

    tracing::warn!("Upload {} did not produce an asset in time", upload_id);
    Err(ServiceError::Timeout(format!(
        "Video upload {} is still processing",
        upload_id
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::{ConnectorError, PlaybackId, UploadSession, UploadStatus};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Reports an asset id only from the `ready_after`-th poll on.
    struct Scripted {
        ready_after: u32,
        polls: AtomicU32,
        upload_status: Option<String>,
    }

    impl Scripted {
        fn new(ready_after: u32) -> Self {
            Self {
                ready_after,
                polls: AtomicU32::new(0),
                upload_status: None,
            }
        }
    }

    #[async_trait::async_trait]
    impl VideoServiceConnector for Scripted {
        async fn create_upload(&self) -> Result<UploadSession, ConnectorError> {
            Err(ConnectorError::Internal("not used".into()))
        }

        async fn get_upload(&self, upload_id: &str) -> Result<UploadStatus, ConnectorError> {
            let poll = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(UploadStatus {
                id: upload_id.to_string(),
                status: self.upload_status.clone(),
                asset_id: (poll >= self.ready_after).then(|| "as-1".to_string()),
            })
        }

        async fn get_asset(&self, asset_id: &str) -> Result<AssetInfo, ConnectorError> {
            Ok(AssetInfo {
                id: asset_id.to_string(),
                status: "ready".to_string(),
                playback_ids: vec![PlaybackId {
                    id: "pb-1".to_string(),
                    policy: None,
                }],
                aspect_ratio: None,
                duration: None,
            })
        }
    }

    fn quick(attempts: u32) -> PollPolicy {
        PollPolicy {
            attempts,
            interval: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn resolves_once_asset_appears() {
        let connector = Scripted::new(3);
        let asset = await_video_asset(&connector, "up-1", quick(5)).await.unwrap();

        assert_eq!(asset.primary_playback_id(), "pb-1");
        assert_eq!(connector.polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_attempts() {
        let connector = Scripted::new(10);
        let err = await_video_asset(&connector, "up-1", quick(2)).await.unwrap_err();

        assert!(matches!(err, ServiceError::Timeout(_)));
        assert_eq!(connector.polls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn errored_upload_is_upstream_failure() {
        let mut connector = Scripted::new(10);
        connector.upload_status = Some("errored".to_string());
        let err = await_video_asset(&connector, "up-1", quick(3)).await.unwrap_err();

        assert!(matches!(err, ServiceError::Upstream(_)));
    }
}
