// ============================================================================
// Menu Server - JSON File Repository
// File: crates/menu-server/src/storage/json_file.rs
// ============================================================================
//! The whole menu lives in one pretty-printed JSON array.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use menu_core::repositories::MenuRepository;
use menu_core::{MenuCategory, MenuError};
use tokio::fs;
use tracing::{debug, info};

pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent(&self) -> Result<(), MenuError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).await?;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl MenuRepository for JsonFileRepository {
    async fn load_document(&self) -> Result<Vec<MenuCategory>, MenuError> {
        self.ensure_parent().await?;

        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Menu file {} missing, creating empty menu", self.path.display());
                fs::write(&self.path, b"[]").await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Writes a sibling temp file and renames it over the document.
    async fn save_document(&self, menu: &[MenuCategory]) -> Result<(), MenuError> {
        self.ensure_parent().await?;

        let json = serde_json::to_vec_pretty(menu)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, &json).await?;
        fs::rename(&staging, &self.path).await?;

        debug!("Saved menu to {} ({} bytes)", self.path.display(), json.len());
        Ok(())
    }
}
