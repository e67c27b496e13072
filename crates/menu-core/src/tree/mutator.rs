//! Structural edits: insert, update, delete, duplicate.
//!
//! Containers (the category and the parent path) must resolve; a missing
//! target inside a resolved container is a silent no-op.

use chrono::Utc;
use tracing::debug;

use crate::domain::{CategoryPatch, MenuCategory, MenuItem, MenuItemPatch, COPY_SUFFIX};
use crate::error::MenuError;
use crate::slug::generate_slug;
use crate::tree::ids::IdAllocator;
use crate::tree::resolver::{container_mut, find_item_and_parent};
use crate::tree::{position, renumber};

/// Outcome of a delete: the new snapshot plus the images the removed subtree
/// referenced, in visiting order.
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    pub menu: Vec<MenuCategory>,
    pub images: Vec<String>,
    /// Nodes removed from the document (0 when the target was absent).
    pub removed_nodes: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Duplicated {
    pub menu: Vec<MenuCategory>,
    /// Id of the copy; `None` when the source was not found.
    pub id: Option<String>,
}

/// Appends `category` at the end of the document.
pub fn create_category(menu: &[MenuCategory], mut category: MenuCategory) -> Vec<MenuCategory> {
    let mut next = menu.to_vec();
    category.order = next.len();
    next.push(category);
    next
}

pub fn update_category(
    menu: &[MenuCategory],
    category_id: &str,
    patch: &CategoryPatch,
) -> Vec<MenuCategory> {
    let mut next = menu.to_vec();
    match next.iter_mut().find(|category| category.id == category_id) {
        Some(category) => category.apply(patch),
        None => debug!("Update skipped: category {} not found", category_id),
    }
    next
}

/// Removes a whole category, reporting every image it held.
pub fn delete_category(menu: &[MenuCategory], category_id: &str) -> Removal {
    let mut next = menu.to_vec();
    let mut images = Vec::new();
    let mut removed_nodes = 0;

    if let Some(index) = position(&next, category_id) {
        let category = next.remove(index);
        category.collect_images(&mut images);
        removed_nodes = category.subtree_size();
        renumber(&mut next);
    } else {
        debug!("Delete skipped: category {} not found", category_id);
    }

    Removal {
        menu: next,
        images,
        removed_nodes,
    }
}

/// Appends `node` to the list at `category_id` + `parent_path` with
/// `order = len`.
pub fn insert_item(
    menu: &[MenuCategory],
    category_id: &str,
    parent_path: &[String],
    mut node: MenuItem,
    is_subcategory: bool,
) -> Result<Vec<MenuCategory>, MenuError> {
    let mut next = menu.to_vec();
    let list = container_mut(&mut next, category_id, parent_path)?;

    node.is_subcategory = is_subcategory;
    if is_subcategory {
        node.items.get_or_insert_with(Vec::new);
    } else {
        node.items = None;
    }
    node.order = list.len();
    list.push(node);

    Ok(next)
}

/// Shallow-merges `patch` into the node `item_id` of the resolved list.
pub fn update_item(
    menu: &[MenuCategory],
    category_id: &str,
    item_id: &str,
    parent_path: &[String],
    patch: &MenuItemPatch,
) -> Result<Vec<MenuCategory>, MenuError> {
    let mut next = menu.to_vec();
    let list = container_mut(&mut next, category_id, parent_path)?;

    match list.iter_mut().find(|item| item.id == item_id) {
        Some(item) => item.apply(patch),
        None => debug!("Update skipped: item {} not found", item_id),
    }
    Ok(next)
}

/// Removes `item_id` from the resolved list and renumbers what is left.
/// The returned image list covers the node and all of its descendants.
pub fn delete_item(
    menu: &[MenuCategory],
    category_id: &str,
    item_id: &str,
    parent_path: &[String],
) -> Result<Removal, MenuError> {
    let mut next = menu.to_vec();
    let list = container_mut(&mut next, category_id, parent_path)?;

    let mut images = Vec::new();
    let mut removed_nodes = 0;
    match position(list, item_id) {
        Some(index) => {
            let removed = list.remove(index);
            removed.collect_images(&mut images);
            removed_nodes = removed.subtree_size();
            renumber(list);
        }
        None => debug!("Delete skipped: item {} not found", item_id),
    }

    Ok(Removal {
        menu: next,
        images,
        removed_nodes,
    })
}

/// Copies the node `item_id`, found anywhere in the document, to the tail of
/// the list at `category_id` + `parent_path`.
///
/// The copy gets a fresh id (descendants too), a suffixed name, a new slug and
/// a current `lastModified`. The target list need not be the one the source
/// lives in.
pub fn duplicate_item(
    menu: &[MenuCategory],
    category_id: &str,
    item_id: &str,
    parent_path: &[String],
) -> Result<Duplicated, MenuError> {
    let Some(source) = find_item_and_parent(menu, item_id).and_then(|found| found.item()) else {
        debug!("Duplicate skipped: item {} not found", item_id);
        return Ok(Duplicated {
            menu: menu.to_vec(),
            id: None,
        });
    };

    let mut copy = source.clone();
    IdAllocator::for_menu(menu).reassign(&mut copy);
    copy.name = format!("{}{}", source.name, COPY_SUFFIX);
    copy.slug = Some(generate_slug(&copy.name));
    copy.last_modified = Some(Utc::now());
    let id = copy.id.clone();

    let mut next = menu.to_vec();
    let list = container_mut(&mut next, category_id, parent_path)?;
    copy.order = list.len();
    list.push(copy);

    Ok(Duplicated { menu: next, id: Some(id) })
}

/// Flips `isVisible` of the node `item_id`.
///
/// The current value is read by a document-wide search; the write goes
/// through [`update_item`] at the given location.
pub fn toggle_visibility(
    menu: &[MenuCategory],
    category_id: &str,
    item_id: &str,
    parent_path: &[String],
) -> Result<Vec<MenuCategory>, MenuError> {
    let Some(item) = find_item_and_parent(menu, item_id).and_then(|found| found.item()) else {
        debug!("Toggle skipped: item {} not found", item_id);
        return Ok(menu.to_vec());
    };

    let patch = MenuItemPatch {
        is_visible: Some(!item.is_visible),
        ..Default::default()
    };
    update_item(menu, category_id, item_id, parent_path, &patch)
}
