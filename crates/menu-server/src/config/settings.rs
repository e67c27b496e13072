use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    /// JSON document holding the whole menu.
    pub menu_path: PathBuf,
    pub uploads_dir: PathBuf,
    /// URL prefix under which uploads are served and referenced.
    pub uploads_url_prefix: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `json` or `pretty`.
    pub format: String,
    /// Directory for the daily-rotated log file; stdout only when unset.
    pub directory: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3001,
                max_upload_mb: 10,
            },
            storage: StorageConfig {
                menu_path: PathBuf::from("data/menu.json"),
                uploads_dir: PathBuf::from("public/uploads"),
                uploads_url_prefix: "/uploads".to_string(),
            },
            logging: LoggingConfig {
                level: "info,menu_server=debug,menu_core=debug".to_string(),
                format: "pretty".to_string(),
                directory: Some(PathBuf::from("logs")),
            },
        }
    }
}

impl Settings {
    /// Defaults, then `config/settings.toml` if present, then `APP__*`
    /// environment variables.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Settings::default();
        let config = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port as i64)?
            .set_default("server.max_upload_mb", defaults.server.max_upload_mb as i64)?
            .set_default(
                "storage.menu_path",
                defaults.storage.menu_path.to_string_lossy().into_owned(),
            )?
            .set_default(
                "storage.uploads_dir",
                defaults.storage.uploads_dir.to_string_lossy().into_owned(),
            )?
            .set_default("storage.uploads_url_prefix", defaults.storage.uploads_url_prefix)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .set_default("logging.directory", "logs")?
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;
        settings.normalize()?;
        Ok(settings)
    }

    /// Upload prefix with a leading slash and no trailing one. The root path
    /// is rejected: uploads must live under their own segment.
    fn normalize(&mut self) -> Result<()> {
        let prefix = self.storage.uploads_url_prefix.trim_matches('/');
        if prefix.is_empty() {
            anyhow::bail!(
                "storage.uploads_url_prefix must name a path segment, got {:?}",
                self.storage.uploads_url_prefix
            );
        }
        self.storage.uploads_url_prefix = format!("/{prefix}");
        Ok(())
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb * 1024 * 1024
    }
}
