use std::sync::Arc;

use menu_core::services::MenuService;

use crate::config::Settings;
use crate::storage::{JsonFileRepository, UploadDirImageStore};

pub type FileMenuService = MenuService<JsonFileRepository, UploadDirImageStore>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub menu_service: Arc<FileMenuService>,
    pub image_store: Arc<UploadDirImageStore>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let menu_repo = Arc::new(JsonFileRepository::new(settings.storage.menu_path.clone()));
        let image_store = Arc::new(UploadDirImageStore::new(
            settings.storage.uploads_dir.clone(),
            settings.storage.uploads_url_prefix.clone(),
        ));
        let menu_service = Arc::new(MenuService::new(menu_repo, image_store.clone()));

        Self {
            menu_service,
            image_store,
            settings: Arc::new(settings),
        }
    }
}
