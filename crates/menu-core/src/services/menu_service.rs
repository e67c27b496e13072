// ============================================================================
// Menu Core - Menu Service
// File: crates/menu-core/src/services/menu_service.rs
// ============================================================================
//! Menu editing service: load, apply one tree operation, save the whole
//! document, then clean up images the change orphaned.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::domain::{
    CategoryPatch, MenuCategory, MenuItem, MenuItemPatch, NEW_DISH_NAME, NEW_SUBCATEGORY_NAME,
};
use crate::error::MenuError;
use crate::repositories::{ImageStore, MenuRepository};
use crate::slug::generate_slug;
use crate::tree::{
    self, build_path, Crumb, Direction, DragRef, FilterType, IdAllocator, SearchResult, SortType,
};

/// Result of adding a node: the committed tree, the node as inserted and the
/// trail leading to its list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreated {
    pub menu: Vec<MenuCategory>,
    pub item: MenuItem,
    pub breadcrumbs: Vec<Crumb>,
}

/// A computed change waiting to be committed.
struct Staged<T> {
    menu: Vec<MenuCategory>,
    stale_images: Vec<String>,
    output: T,
}

impl Staged<()> {
    fn tree(menu: Vec<MenuCategory>) -> Self {
        Self {
            menu,
            stale_images: Vec::new(),
            output: (),
        }
    }
}

pub struct MenuService<R: MenuRepository, I: ImageStore> {
    menu_repo: Arc<R>,
    image_store: Arc<I>,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl<R: MenuRepository, I: ImageStore> MenuService<R, I> {
    pub fn new(menu_repo: Arc<R>, image_store: Arc<I>) -> Self {
        Self {
            menu_repo,
            image_store,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn load_menu(&self) -> Result<Vec<MenuCategory>, MenuError> {
        self.menu_repo.load_document().await
    }

    /// Replaces the stored document as a whole.
    pub async fn save_menu(&self, menu: &[MenuCategory]) -> Result<(), MenuError> {
        let _guard = self.write_lock.lock().await;
        self.menu_repo.save_document(menu).await?;
        info!("Menu document replaced ({} categories)", menu.len());
        Ok(())
    }

    pub async fn public_menu(&self) -> Result<Vec<MenuCategory>, MenuError> {
        Ok(tree::public_menu(&self.load_menu().await?))
    }

    pub async fn sorted_menu(&self, sort: SortType) -> Result<Vec<MenuCategory>, MenuError> {
        Ok(tree::sorted_view(&self.load_menu().await?, sort))
    }

    pub async fn search(
        &self,
        query: &str,
        filter: FilterType,
    ) -> Result<Vec<SearchResult>, MenuError> {
        Ok(tree::search(&self.load_menu().await?, query, filter))
    }

    pub async fn breadcrumbs(
        &self,
        category_id: &str,
        parent_path: &[String],
    ) -> Result<Vec<Crumb>, MenuError> {
        Ok(build_path(&self.load_menu().await?, category_id, parent_path))
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn create_category(&self, name: &str) -> Result<Vec<MenuCategory>, MenuError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MenuError::ValidationError(
                "Category name must not be empty".to_string(),
            ));
        }

        self.commit(|menu| {
            let id = IdAllocator::for_menu(menu).allocate();
            info!("Creating category {} ({})", name, id);
            Ok(Staged::tree(tree::create_category(menu, MenuCategory::new(id, name))))
        })
        .await
        .map(|(menu, _)| menu)
    }

    pub async fn update_category(
        &self,
        category_id: &str,
        patch: CategoryPatch,
    ) -> Result<Vec<MenuCategory>, MenuError> {
        patch.validate()?;
        let mut patch = patch;
        if let (Some(name), None) = (&patch.name, &patch.slug) {
            patch.slug = Some(generate_slug(name));
        }
        patch.last_modified.get_or_insert_with(Utc::now);

        self.commit(|menu| Ok(Staged::tree(tree::update_category(menu, category_id, &patch))))
            .await
            .map(|(menu, _)| menu)
    }

    /// Deletes the category and every image referenced inside it.
    pub async fn delete_category(&self, category_id: &str) -> Result<Vec<MenuCategory>, MenuError> {
        self.commit(|menu| {
            let removal = tree::delete_category(menu, category_id);
            Ok(Staged {
                menu: removal.menu,
                stale_images: removal.images,
                output: (),
            })
        })
        .await
        .map(|(menu, _)| menu)
    }

    pub async fn reorder_category(
        &self,
        category_id: &str,
        direction: Direction,
    ) -> Result<Vec<MenuCategory>, MenuError> {
        self.commit(|menu| Ok(Staged::tree(tree::reorder_category(menu, category_id, direction))))
            .await
            .map(|(menu, _)| menu)
    }

    pub async fn move_category(
        &self,
        from_index: usize,
        to_index: usize,
    ) -> Result<Vec<MenuCategory>, MenuError> {
        self.commit(|menu| Ok(Staged::tree(tree::move_category(menu, from_index, to_index)?)))
            .await
            .map(|(menu, _)| menu)
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    /// Appends a default dish or subcategory to the list at `parent_path`.
    pub async fn add_item(
        &self,
        category_id: &str,
        parent_path: &[String],
        is_subcategory: bool,
    ) -> Result<ItemCreated, MenuError> {
        let (menu, (item, breadcrumbs)) = self
            .commit(|menu| {
                let id = IdAllocator::for_menu(menu).allocate();
                let node = if is_subcategory {
                    MenuItem::subcategory(id.clone(), NEW_SUBCATEGORY_NAME)
                } else {
                    MenuItem::dish(id.clone(), NEW_DISH_NAME)
                };

                let next = tree::insert_item(menu, category_id, parent_path, node, is_subcategory)?;
                let item = tree::resolve(&next, category_id, parent_path, Some(id.as_str()))?
                    .node
                    .cloned()
                    .ok_or_else(|| MenuError::TargetNotFound(id.clone()))?;
                let breadcrumbs = build_path(&next, category_id, parent_path);
                info!("Added item {} to category {}", id, category_id);

                Ok(Staged {
                    menu: next,
                    stale_images: Vec::new(),
                    output: (item, breadcrumbs),
                })
            })
            .await?;

        Ok(ItemCreated {
            menu,
            item,
            breadcrumbs,
        })
    }

    /// Shallow-merges `patch`, stamping `lastModified` and deriving the slug
    /// from a new name. An image the patch replaces or clears is deleted.
    pub async fn update_item(
        &self,
        category_id: &str,
        item_id: &str,
        parent_path: &[String],
        patch: MenuItemPatch,
    ) -> Result<Vec<MenuCategory>, MenuError> {
        patch.validate()?;
        let mut patch = patch;
        if let (Some(name), None) = (&patch.name, &patch.slug) {
            patch.slug = Some(generate_slug(name));
        }
        patch.last_modified.get_or_insert_with(Utc::now);

        self.commit(|menu| {
            let previous = tree::resolve(menu, category_id, parent_path, Some(item_id))?
                .node
                .and_then(MenuItem::image_ref)
                .map(str::to_string);
            let next = tree::update_item(menu, category_id, item_id, parent_path, &patch)?;

            let stale_images = match (previous, &patch.image) {
                (Some(old), Some(new)) if old != *new => vec![old],
                _ => Vec::new(),
            };
            Ok(Staged {
                menu: next,
                stale_images,
                output: (),
            })
        })
        .await
        .map(|(menu, _)| menu)
    }

    /// Deletes the node, its subtree, and every image the subtree referenced.
    pub async fn delete_item(
        &self,
        category_id: &str,
        item_id: &str,
        parent_path: &[String],
    ) -> Result<Vec<MenuCategory>, MenuError> {
        self.commit(|menu| {
            let removal = tree::delete_item(menu, category_id, item_id, parent_path)?;
            if removal.removed_nodes > 0 {
                info!(
                    "Deleting item {} ({} nodes, {} images)",
                    item_id,
                    removal.removed_nodes,
                    removal.images.len()
                );
            }
            Ok(Staged {
                menu: removal.menu,
                stale_images: removal.images,
                output: (),
            })
        })
        .await
        .map(|(menu, _)| menu)
    }

    pub async fn duplicate_item(
        &self,
        category_id: &str,
        item_id: &str,
        parent_path: &[String],
    ) -> Result<Vec<MenuCategory>, MenuError> {
        self.commit(|menu| {
            let duplicated = tree::duplicate_item(menu, category_id, item_id, parent_path)?;
            if let Some(id) = &duplicated.id {
                info!("Duplicated item {} as {}", item_id, id);
            }
            Ok(Staged::tree(duplicated.menu))
        })
        .await
        .map(|(menu, _)| menu)
    }

    pub async fn toggle_visibility(
        &self,
        category_id: &str,
        item_id: &str,
        parent_path: &[String],
    ) -> Result<Vec<MenuCategory>, MenuError> {
        self.commit(|menu| {
            Ok(Staged::tree(tree::toggle_visibility(
                menu,
                category_id,
                item_id,
                parent_path,
            )?))
        })
        .await
        .map(|(menu, _)| menu)
    }

    pub async fn reorder_item(
        &self,
        category_id: &str,
        item_id: &str,
        parent_path: &[String],
        direction: Direction,
    ) -> Result<Vec<MenuCategory>, MenuError> {
        self.commit(|menu| {
            Ok(Staged::tree(tree::reorder_item(
                menu,
                category_id,
                item_id,
                parent_path,
                direction,
            )?))
        })
        .await
        .map(|(menu, _)| menu)
    }

    pub async fn move_item(
        &self,
        category_id: &str,
        parent_path: &[String],
        from_index: usize,
        to_index: usize,
    ) -> Result<Vec<MenuCategory>, MenuError> {
        self.commit(|menu| {
            Ok(Staged::tree(tree::move_sibling_item(
                menu,
                category_id,
                parent_path,
                from_index,
                to_index,
            )?))
        })
        .await
        .map(|(menu, _)| menu)
    }

    pub async fn move_dragged(
        &self,
        dragged: &DragRef,
        target: &DragRef,
    ) -> Result<Vec<MenuCategory>, MenuError> {
        self.commit(|menu| Ok(Staged::tree(tree::move_dragged(menu, dragged, target)?)))
            .await
            .map(|(menu, _)| menu)
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    pub async fn upload_image(&self, file_name: &str, bytes: &[u8]) -> Result<String, MenuError> {
        let reference = self.image_store.store_image(file_name, bytes).await?;
        info!("Stored image {} ({} bytes)", reference, bytes.len());
        Ok(reference)
    }

    pub async fn delete_image(&self, reference: &str) -> Result<(), MenuError> {
        self.image_store.delete_image(reference).await?;
        info!("Deleted image {}", reference);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Commit pipeline
    // ------------------------------------------------------------------

    /// Load → compute → save → image cleanup, under the write lock.
    ///
    /// An unchanged tree is not written. When the save fails the error is
    /// returned and no image is touched.
    async fn commit<T, F>(&self, op: F) -> Result<(Vec<MenuCategory>, T), MenuError>
    where
        F: FnOnce(&[MenuCategory]) -> Result<Staged<T>, MenuError>,
    {
        let _guard = self.write_lock.lock().await;
        let current = self.menu_repo.load_document().await?;
        let staged = op(&current)?;

        if staged.menu == current {
            debug!("Menu unchanged, skipping save");
        } else if let Err(e) = self.menu_repo.save_document(&staged.menu).await {
            error!("Failed to save menu: {}", e);
            return Err(e);
        }

        for image in &staged.stale_images {
            if let Err(e) = self.image_store.delete_image(image).await {
                // Best-effort cleanup: a leftover file never breaks the menu.
                warn!("Failed to delete image {}: {}", image, e);
            }
        }

        Ok((staged.menu, staged.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockImageStore, MockMenuRepository};
    use crate::tree::fixtures::{self, ids, path};
    use std::sync::Mutex as StdMutex;

    type Saved = Arc<StdMutex<Vec<Vec<MenuCategory>>>>;

    fn repo_with(menu: Vec<MenuCategory>) -> (MockMenuRepository, Saved) {
        let saved: Saved = Arc::default();
        let mut repo = MockMenuRepository::new();
        repo.expect_load_document()
            .returning(move || Ok(menu.clone()));
        let sink = saved.clone();
        repo.expect_save_document().returning(move |menu| {
            sink.lock().unwrap().push(menu.to_vec());
            Ok(())
        });
        (repo, saved)
    }

    fn service(
        repo: MockMenuRepository,
        images: MockImageStore,
    ) -> MenuService<MockMenuRepository, MockImageStore> {
        MenuService::new(Arc::new(repo), Arc::new(images))
    }

    #[tokio::test]
    async fn test_delete_subcategory_cleans_every_image() {
        let (repo, saved) = repo_with(fixtures::menu());
        let deleted: Arc<StdMutex<Vec<String>>> = Arc::default();
        let sink = deleted.clone();
        let mut images = MockImageStore::new();
        images.expect_delete_image().times(2).returning(move |reference| {
            sink.lock().unwrap().push(reference.to_string());
            Ok(())
        });

        let menu = service(repo, images).delete_item("c1", "s1", &[]).await.unwrap();

        assert_eq!(ids(&menu[0].items), vec!["a", "d"]);
        assert_eq!(saved.lock().unwrap().len(), 1);
        assert_eq!(
            *deleted.lock().unwrap(),
            vec!["/uploads/b.jpg".to_string(), "/uploads/c.jpg".to_string()]
        );
    }

    #[tokio::test]
    async fn test_image_delete_failure_is_swallowed() {
        let (repo, saved) = repo_with(fixtures::menu());
        let mut images = MockImageStore::new();
        images
            .expect_delete_image()
            .returning(|reference| Err(MenuError::ImageNotFound(reference.to_string())));

        let menu = service(repo, images).delete_category("c1").await.unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_failure_propagates_and_keeps_images() {
        let mut repo = MockMenuRepository::new();
        repo.expect_load_document().returning(|| Ok(fixtures::menu()));
        repo.expect_save_document()
            .times(1)
            .returning(|_| Err(MenuError::PersistenceFailure("disk full".to_string())));
        let mut images = MockImageStore::new();
        images.expect_delete_image().never();

        let err = service(repo, images).delete_item("c1", "a", &[]).await.unwrap_err();
        assert_eq!(err, MenuError::PersistenceFailure("disk full".to_string()));
    }

    #[tokio::test]
    async fn test_noop_skips_save() {
        let mut repo = MockMenuRepository::new();
        repo.expect_load_document().returning(|| Ok(fixtures::menu()));
        repo.expect_save_document().never();

        let svc = service(repo, MockImageStore::new());
        let menu = svc.reorder_item("c1", "a", &[], Direction::Up).await.unwrap();
        assert_eq!(ids(&menu[0].items), vec!["a", "s1", "d"]);
    }

    #[tokio::test]
    async fn test_add_item_returns_node_and_trail() {
        let (repo, saved) = repo_with(fixtures::menu());
        let svc = service(repo, MockImageStore::new());

        let created = svc.add_item("c1", &path(&["s1"]), true).await.unwrap();

        assert_eq!(created.item.name, NEW_SUBCATEGORY_NAME);
        assert!(created.item.is_subcategory);
        assert_eq!(created.item.order, 2);
        assert_eq!(created.breadcrumbs.len(), 2);
        assert_eq!(created.breadcrumbs[1].id, "s1");
        assert_eq!(saved.lock().unwrap()[0], created.menu);
    }

    #[tokio::test]
    async fn test_add_item_bad_path_does_not_save() {
        let mut repo = MockMenuRepository::new();
        repo.expect_load_document().returning(|| Ok(fixtures::menu()));
        repo.expect_save_document().never();

        let err = service(repo, MockImageStore::new())
            .add_item("c1", &path(&["ghost"]), false)
            .await
            .unwrap_err();
        assert_eq!(err, MenuError::PathNotFound("ghost".to_string()));
    }

    #[tokio::test]
    async fn test_update_item_replacing_image_deletes_old_file() {
        let (repo, _saved) = repo_with(fixtures::menu());
        let mut images = MockImageStore::new();
        images
            .expect_delete_image()
            .withf(|reference| reference.to_string() == "/uploads/a.jpg")
            .times(1)
            .returning(|_| Ok(()));

        let patch = MenuItemPatch {
            name: Some("Пельмени".to_string()),
            image: Some("/uploads/new.jpg".to_string()),
            ..Default::default()
        };
        let menu = service(repo, images)
            .update_item("c1", "a", &[], patch)
            .await
            .unwrap();

        let item = &menu[0].items[0];
        assert_eq!(item.image.as_deref(), Some("/uploads/new.jpg"));
        assert_eq!(item.slug.as_deref(), Some("пельмени"));
    }

    #[tokio::test]
    async fn test_update_item_rejects_negative_nutrition() {
        let mut repo = MockMenuRepository::new();
        repo.expect_load_document().never();

        let patch = MenuItemPatch {
            nutrition: Some(crate::domain::Nutrition {
                fats: -3.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = service(repo, MockImageStore::new())
            .update_item("c1", "a", &[], patch)
            .await
            .unwrap_err();
        assert!(matches!(err, MenuError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_create_category_appends() {
        let (repo, _saved) = repo_with(fixtures::menu());
        let menu = service(repo, MockImageStore::new())
            .create_category("  Десерты ")
            .await
            .unwrap();

        let created = menu.last().unwrap();
        assert_eq!(created.name, "Десерты");
        assert_eq!(created.order, 2);
        assert_eq!(created.slug.as_deref(), Some("десерты"));
    }

    #[tokio::test]
    async fn test_create_category_requires_name() {
        let mut repo = MockMenuRepository::new();
        repo.expect_load_document().never();
        let err = service(repo, MockImageStore::new())
            .create_category("   ")
            .await
            .unwrap_err();
        assert!(matches!(err, MenuError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_upload_image_delegates() {
        let mut images = MockImageStore::new();
        images
            .expect_store_image()
            .withf(|name, bytes| name.to_string() == "photo.png" && bytes.len() == 3)
            .returning(|_, _| Ok("/uploads/1.png".to_string()));

        let reference = service(MockMenuRepository::new(), images)
            .upload_image("photo.png", &[1, 2, 3])
            .await
            .unwrap();
        assert_eq!(reference, "/uploads/1.png");
    }
}
