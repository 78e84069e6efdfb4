//! External Service Connectors
//!
//! Adapters for the services this application delegates to. Routes receive a trait
//! object (`web::Data<Arc<dyn VideoServiceConnector>>`) and never see the HTTP details,
//! so tests swap in the mock.
//!
//! 1. Trait in `{service}/mod.rs`
//! 2. HTTP client in `{service}/client.rs`
//! 3. Configuration in `config.rs` (enable/disable per environment)

pub mod config;
pub mod errors;
pub mod video_service;

pub use config::{ConnectorConfig, VideoServiceConfig};
pub use errors::ConnectorError;
pub use video_service::init as init_video_service;
pub use video_service::{
    AssetInfo, PlaybackId, UploadSession, UploadStatus, VideoServiceClient, VideoServiceConnector,
};
