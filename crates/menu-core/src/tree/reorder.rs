//! Reordering within one sibling list: neighbor swaps and drag-and-drop
//! relocation.
//!
//! Relocation only happens between positions sharing the same parent; a
//! request spanning two containers is rejected with `CrossContainerMove`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::MenuCategory;
use crate::error::MenuError;
use crate::tree::resolver::{container_mut, resolve};
use crate::tree::{position, renumber, Sibling};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Swaps the category with its neighbor. No-op at the boundary or when the
/// id is unknown.
pub fn reorder_category(
    menu: &[MenuCategory],
    category_id: &str,
    direction: Direction,
) -> Vec<MenuCategory> {
    let mut next = menu.to_vec();
    if !swap_with_neighbor(&mut next, category_id, direction) {
        debug!("Reorder skipped for category {} ({:?})", category_id, direction);
    }
    next
}

/// Swaps `item_id` with its neighbor in the resolved list.
pub fn reorder_item(
    menu: &[MenuCategory],
    category_id: &str,
    item_id: &str,
    parent_path: &[String],
    direction: Direction,
) -> Result<Vec<MenuCategory>, MenuError> {
    let mut next = menu.to_vec();
    let list = container_mut(&mut next, category_id, parent_path)?;
    if !swap_with_neighbor(list, item_id, direction) {
        debug!("Reorder skipped for item {} ({:?})", item_id, direction);
    }
    Ok(next)
}

/// Moves the category at `from_index` to `to_index`. See [`relocate`].
pub fn move_category(
    menu: &[MenuCategory],
    from_index: usize,
    to_index: usize,
) -> Result<Vec<MenuCategory>, MenuError> {
    let mut next = menu.to_vec();
    relocate(&mut next, from_index, to_index)?;
    Ok(next)
}

/// Moves an item between two positions of the same sibling list.
pub fn move_sibling_item(
    menu: &[MenuCategory],
    category_id: &str,
    parent_path: &[String],
    from_index: usize,
    to_index: usize,
) -> Result<Vec<MenuCategory>, MenuError> {
    let mut next = menu.to_vec();
    let list = container_mut(&mut next, category_id, parent_path)?;
    relocate(list, from_index, to_index)?;
    Ok(next)
}

/// What a drag handle is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    Category,
    Subcategory,
    Item,
}

/// One end of a drag-and-drop gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragRef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DragKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub parent_path: Vec<String>,
}

/// Drops `dragged` onto `target`: the dragged node takes the target's place.
pub fn move_dragged(
    menu: &[MenuCategory],
    dragged: &DragRef,
    target: &DragRef,
) -> Result<Vec<MenuCategory>, MenuError> {
    let cross = || MenuError::CrossContainerMove {
        dragged: dragged.id.clone(),
        target: target.id.clone(),
    };

    match (dragged.kind, target.kind) {
        (DragKind::Category, DragKind::Category) => {
            let from = position(menu, &dragged.id)
                .ok_or_else(|| MenuError::TargetNotFound(dragged.id.clone()))?;
            let to = position(menu, &target.id)
                .ok_or_else(|| MenuError::TargetNotFound(target.id.clone()))?;
            move_category(menu, from, to)
        }
        (DragKind::Category, _) | (_, DragKind::Category) => Err(cross()),
        _ => {
            let (Some(category_id), Some(target_category)) =
                (dragged.category_id.as_deref(), target.category_id.as_deref())
            else {
                return Err(cross());
            };
            if category_id != target_category || dragged.parent_path != target.parent_path {
                return Err(cross());
            }

            let list = resolve(menu, category_id, &dragged.parent_path, None)?.container;
            let from = position(list, &dragged.id)
                .ok_or_else(|| MenuError::TargetNotFound(dragged.id.clone()))?;
            let to = position(list, &target.id)
                .ok_or_else(|| MenuError::TargetNotFound(target.id.clone()))?;
            move_sibling_item(menu, category_id, &dragged.parent_path, from, to)
        }
    }
}

fn swap_with_neighbor<T: Sibling>(list: &mut [T], id: &str, direction: Direction) -> bool {
    let Some(index) = position(list, id) else {
        return false;
    };
    let neighbor = match direction {
        Direction::Up if index > 0 => index - 1,
        Direction::Down if index + 1 < list.len() => index + 1,
        _ => return false,
    };
    list.swap(index, neighbor);
    renumber(list);
    true
}

/// Removes the element at `from` and re-inserts it at `to`, where `to` is an
/// index into the list *before* removal (`0..=len`). Removing from in front
/// of the target shifts it left by one, so the insertion point is
/// compensated.
fn relocate<T: Sibling>(list: &mut Vec<T>, from: usize, to: usize) -> Result<(), MenuError> {
    let len = list.len();
    if from >= len {
        return Err(MenuError::IndexOutOfRange { index: from, len });
    }
    if to > len {
        return Err(MenuError::IndexOutOfRange { index: to, len });
    }

    let adjusted = if from < to { to - 1 } else { to };
    let node = list.remove(from);
    list.insert(adjusted, node);
    renumber(list);
    Ok(())
}
