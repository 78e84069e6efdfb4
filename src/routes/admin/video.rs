use crate::connectors::VideoServiceConnector;
use crate::helpers::JsonResponse;
use crate::services::ServiceError;
use crate::views::admin::VideoUploadTarget;
use actix_web::{post, web, Responder, Result};
use std::sync::Arc;

/// Ask the video host for a direct-upload URL.
#[tracing::instrument(name = "Admin create video upload.", skip(connector))]
#[post("/upload")]
pub async fn create_upload(
    connector: web::Data<Arc<dyn VideoServiceConnector>>,
) -> Result<impl Responder> {
    let session = connector
        .create_upload()
        .await
        .map_err(ServiceError::from)?;

    tracing::info!("Video upload {} created", session.id);
    Ok(JsonResponse::<VideoUploadTarget>::build()
        .set_id(&session.id)
        .set_item(VideoUploadTarget {
            url: session.url,
            upload_id: session.id,
        })
        .ok("OK"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::video_service::mock::MockVideoServiceConnector;
    use crate::connectors::{ConnectorError, UploadSession};
    use actix_web::{http::StatusCode, test, App};

    struct Down;

    #[async_trait::async_trait]
    impl VideoServiceConnector for Down {
        async fn create_upload(&self) -> Result<UploadSession, ConnectorError> {
            Err(ConnectorError::ServiceUnavailable("connection refused".into()))
        }

        async fn get_upload(
            &self,
            _upload_id: &str,
        ) -> Result<crate::connectors::UploadStatus, ConnectorError> {
            Err(ConnectorError::ServiceUnavailable("connection refused".into()))
        }

        async fn get_asset(
            &self,
            _asset_id: &str,
        ) -> Result<crate::connectors::AssetInfo, ConnectorError> {
            Err(ConnectorError::ServiceUnavailable("connection refused".into()))
        }
    }

    #[actix_web::test]
    async fn upload_endpoint_returns_target() {
        let connector: Arc<dyn VideoServiceConnector> =
            Arc::new(MockVideoServiceConnector::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(connector))
                .service(create_upload),
        )
        .await;

        let req = test::TestRequest::post().uri("/upload").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "OK");
        assert!(body["item"]["url"].as_str().unwrap().starts_with("http"));
        assert_eq!(body["item"]["uploadId"], body["id"]);
    }

    #[actix_web::test]
    async fn host_failure_is_bad_gateway() {
        let connector: Arc<dyn VideoServiceConnector> = Arc::new(Down);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(connector))
                .service(create_upload),
        )
        .await;

        let req = test::TestRequest::post().uri("/upload").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Upstream service error");
    }
}
