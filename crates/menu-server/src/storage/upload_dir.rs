// ============================================================================
// Menu Server - Upload Directory Image Store
// File: crates/menu-server/src/storage/upload_dir.rs
// ============================================================================
//! Dish images as plain files in one directory, referenced as
//! `<url_prefix>/<file>`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use menu_core::repositories::ImageStore;
use menu_core::MenuError;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

const REPORT_SAMPLE: usize = 10;

/// Diagnostic snapshot of the uploads directory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadsReport {
    pub path: String,
    pub exists: bool,
    /// First few file names, sorted.
    pub files: Vec<String>,
    pub file_count: usize,
    /// Octal mode bits, unix only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

pub struct UploadDirImageStore {
    dir: PathBuf,
    url_prefix: String,
}

impl UploadDirImageStore {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Maps a stored reference back to its file, rejecting anything that
    /// could escape the uploads directory.
    fn file_for(&self, reference: &str) -> Result<PathBuf, MenuError> {
        let invalid = || MenuError::InvalidImageReference(reference.to_string());

        let rest = reference
            .strip_prefix(self.url_prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(invalid)?;
        let name = rest.rsplit('/').next().unwrap_or_default();
        if matches!(name, "" | "." | "..") || name.contains('\\') {
            return Err(invalid());
        }

        Ok(self.dir.join(name))
    }

    pub async fn inspect(&self) -> Result<UploadsReport, MenuError> {
        let path = fs::canonicalize(&self.dir)
            .await
            .unwrap_or_else(|_| self.dir.clone())
            .display()
            .to_string();

        if !fs::try_exists(&self.dir).await? {
            return Ok(UploadsReport {
                path,
                exists: false,
                files: Vec::new(),
                file_count: 0,
                permissions: None,
            });
        }

        let mut files = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        files.sort();
        let file_count = files.len();
        files.truncate(REPORT_SAMPLE);

        Ok(UploadsReport {
            path,
            exists: true,
            files,
            file_count,
            permissions: mode_bits(&self.dir).await?,
        })
    }
}

#[cfg(unix)]
async fn mode_bits(path: &Path) -> Result<Option<String>, MenuError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).await?;
    Ok(Some(format!("{:o}", metadata.permissions().mode() & 0o777)))
}

#[cfg(not(unix))]
async fn mode_bits(_path: &Path) -> Result<Option<String>, MenuError> {
    Ok(None)
}

#[async_trait]
impl ImageStore for UploadDirImageStore {
    async fn store_image(&self, file_name: &str, bytes: &[u8]) -> Result<String, MenuError> {
        let is_image = mime_guess::from_path(file_name)
            .first()
            .is_some_and(|mime| mime.type_().as_str() == "image");
        if !is_image {
            return Err(MenuError::ValidationError(format!(
                "Not an image file: {file_name}"
            )));
        }

        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        fs::create_dir_all(&self.dir).await?;

        // Millisecond names; bump until one is free.
        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let name = format!("{stamp}{extension}");
            let target = self.dir.join(&name);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&target)
                .await
            {
                Ok(mut file) => {
                    file.write_all(bytes).await?;
                    file.flush().await?;
                    debug!("Wrote {} ({} bytes)", target.display(), bytes.len());
                    return Ok(format!("{}/{}", self.url_prefix, name));
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => stamp += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn delete_image(&self, reference: &str) -> Result<(), MenuError> {
        let file = self.file_for(reference)?;
        match fs::remove_file(&file).await {
            Ok(()) => {
                debug!("Removed {}", file.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(MenuError::ImageNotFound(reference.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> UploadDirImageStore {
        UploadDirImageStore::new(dir.join("uploads"), "/uploads")
    }

    #[tokio::test]
    async fn test_store_names_by_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let first = store.store_image("Photo.JPG", b"one").await.unwrap();
        let second = store.store_image("photo.jpg", b"two").await.unwrap();

        assert!(first.starts_with("/uploads/") && first.ends_with(".jpg"));
        assert_ne!(first, second);
        let stored = store.file_for(&first).unwrap();
        assert_eq!(std::fs::read(stored).unwrap(), b"one");
    }

    #[tokio::test]
    async fn test_store_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let err = store(dir.path())
            .store_image("notes.txt", b"hello")
            .await
            .unwrap_err();
        assert!(matches!(err, MenuError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_delete_image() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let reference = store.store_image("a.png", b"png").await.unwrap();

        store.delete_image(&reference).await.unwrap();

        let err = store.delete_image(&reference).await.unwrap_err();
        assert_eq!(err, MenuError::ImageNotFound(reference));
    }

    #[tokio::test]
    async fn test_delete_rejects_foreign_references() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        for reference in ["/etc/passwd", "/uploads/", "/uploads/..", "https://cdn/x.jpg"] {
            let err = store.delete_image(reference).await.unwrap_err();
            assert!(
                matches!(err, MenuError::InvalidImageReference(_)),
                "{reference} was accepted"
            );
        }
    }

    #[tokio::test]
    async fn test_inspect_reports_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let missing = store.inspect().await.unwrap();
        assert!(!missing.exists);

        for name in ["a.png", "b.png", "c.webp"] {
            store.store_image(name, b"x").await.unwrap();
        }
        let report = store.inspect().await.unwrap();
        assert!(report.exists);
        assert_eq!(report.file_count, 3);
        assert_eq!(report.files.len(), 3);
        #[cfg(unix)]
        assert!(report.permissions.is_some());
    }
}
