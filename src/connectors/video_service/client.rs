use super::{AssetInfo, DataEnvelope, PollPolicy, UploadSession, UploadStatus, VideoServiceConnector};
use crate::connectors::config::VideoServiceConfig;
use crate::connectors::errors::ConnectorError;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::Instrument;

/// HTTP client for the video host API
pub struct VideoServiceClient {
    base_url: String,
    http_client: reqwest::Client,
    credentials: Option<(String, String)>,
    user_agent: String,
    poll_policy: PollPolicy,
}

impl VideoServiceClient {
    pub fn new(config: VideoServiceConfig) -> Result<Self, ConnectorError> {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConnectorError::Internal(format!("HTTP client error: {}", err)))?;

        let credentials = match (config.token_id, config.token_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Some((id, secret)),
            _ => None,
        };
        if credentials.is_none() {
            tracing::warn!("Video service credentials missing; requests will be unauthenticated");
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            credentials,
            user_agent: format!("academy-video-client/{}", env!("CARGO_PKG_VERSION")),
            poll_policy: PollPolicy {
                attempts: config.poll_attempts.max(1),
                interval: Duration::from_millis(config.poll_interval_ms),
            },
        })
    }

    async fn send_request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ConnectorError> {
        let mut builder = self
            .http_client
            .request(method.clone(), format!("{}{}", self.base_url, path))
            .header("User-Agent", &self.user_agent);

        if let Some((id, secret)) = &self.credentials {
            builder = builder.basic_auth(id, Some(secret));
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let span = tracing::info_span!("video_http_request", path, method = %method);
        let resp = builder.send().instrument(span).await?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|err| ConnectorError::HttpError(err.to_string()))?;

        if status.is_success() {
            return serde_json::from_str::<DataEnvelope<T>>(&text)
                .map(|envelope| envelope.data)
                .map_err(|err| {
                    tracing::debug!("Unexpected video host payload: {}", text);
                    ConnectorError::InvalidResponse(err.to_string())
                });
        }

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ConnectorError::Unauthorized(text),
            StatusCode::NOT_FOUND => ConnectorError::NotFound(text),
            StatusCode::TOO_MANY_REQUESTS => {
                ConnectorError::ServiceUnavailable(format!("Rate limited: {}", text))
            }
            status if status.is_server_error() => ConnectorError::ServiceUnavailable(format!(
                "Video host error {}: {}",
                status, text
            )),
            status => ConnectorError::HttpError(format!("Video host error {}: {}", status, text)),
        })
    }
}

#[async_trait::async_trait]
impl VideoServiceConnector for VideoServiceClient {
    async fn create_upload(&self) -> Result<UploadSession, ConnectorError> {
        let body = json!({
            "cors_origin": "*",
            "new_asset_settings": {
                "playback_policy": ["public"],
                "video_quality": "basic"
            }
        });
        self.send_request(Method::POST, "/video/v1/uploads", Some(body))
            .await
    }

    async fn get_upload(&self, upload_id: &str) -> Result<UploadStatus, ConnectorError> {
        let path = format!("/video/v1/uploads/{}", upload_id);
        self.send_request(Method::GET, &path, None).await
    }

    async fn get_asset(&self, asset_id: &str) -> Result<AssetInfo, ConnectorError> {
        let path = format!("/video/v1/assets/{}", asset_id);
        self.send_request(Method::GET, &path, None).await
    }

    fn poll_policy(&self) -> PollPolicy {
        self.poll_policy
    }
}
