use crate::connectors::ConnectorConfig;
use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    pub auth_url: String,
    #[serde(default)]
    pub uploads: UploadSettings,
    #[serde(default)]
    pub connectors: ConnectorConfig,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
    #[serde(default = "DatabaseSettings::default_max_connections")]
    pub max_connections: u32,
}

/// Where uploaded course thumbnails are written and the URL prefix they are served under.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UploadSettings {
    pub dir: String,
    pub public_path: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            dir: "./uploads".to_string(),
            public_path: "/uploads".to_string(),
        }
    }
}

impl DatabaseSettings {
    const fn default_max_connections() -> u32 {
        5
    }

    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // configuration.yaml first, then APP__DATABASE__HOST style overrides
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;

    if let Some(video) = config.connectors.video_service.as_mut() {
        video.load_credentials_from_env();
    }

    Ok(config)
}
