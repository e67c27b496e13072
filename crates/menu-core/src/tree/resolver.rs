//! Path resolution inside the menu tree.
//!
//! A parent path is the ordered list of subcategory ids leading from a
//! category down to one sibling list. Resolution re-walks that path on every
//! call; nodes never hold references to their parents.

use crate::domain::{MenuCategory, MenuItem};
use crate::error::MenuError;
use crate::tree::position;

/// Result of walking `category_id` + `parent_path`.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    /// The sibling list the path leads to.
    pub container: &'a [MenuItem],
    /// The searched node, when an item id was given and found in `container`.
    pub node: Option<&'a MenuItem>,
    /// Position of `node` in `container`.
    pub index: Option<usize>,
}

/// Walks the path and optionally looks up `item_id` in the final list.
///
/// Fails with `TargetNotFound` for an unknown category and `PathNotFound`
/// when a path id is missing or names a dish.
pub fn resolve<'a>(
    menu: &'a [MenuCategory],
    category_id: &str,
    parent_path: &[String],
    item_id: Option<&str>,
) -> Result<Resolved<'a>, MenuError> {
    let category = find_category(menu, category_id)?;
    let container = walk(&category.items, parent_path)?;
    let index = item_id.and_then(|id| position(container, id));

    Ok(Resolved {
        container,
        node: index.map(|i| &container[i]),
        index,
    })
}

pub(crate) fn find_category<'a>(
    menu: &'a [MenuCategory],
    category_id: &str,
) -> Result<&'a MenuCategory, MenuError> {
    menu.iter()
        .find(|category| category.id == category_id)
        .ok_or_else(|| MenuError::TargetNotFound(category_id.to_string()))
}

pub(crate) fn walk<'a>(
    mut items: &'a [MenuItem],
    parent_path: &[String],
) -> Result<&'a [MenuItem], MenuError> {
    for id in parent_path {
        let node = items
            .iter()
            .find(|item| &item.id == id && item.is_subcategory)
            .ok_or_else(|| MenuError::PathNotFound(id.clone()))?;
        items = node.children();
    }
    Ok(items)
}

/// Mutable twin of [`resolve`] used by the mutators on their private copy.
pub(crate) fn container_mut<'a>(
    menu: &'a mut [MenuCategory],
    category_id: &str,
    parent_path: &[String],
) -> Result<&'a mut Vec<MenuItem>, MenuError> {
    let category = menu
        .iter_mut()
        .find(|category| category.id == category_id)
        .ok_or_else(|| MenuError::TargetNotFound(category_id.to_string()))?;

    let mut items = &mut category.items;
    for id in parent_path {
        let node = items
            .iter_mut()
            .find(|item| &item.id == id && item.is_subcategory)
            .ok_or_else(|| MenuError::PathNotFound(id.clone()))?;
        items = node.items.get_or_insert_with(Vec::new);
    }
    Ok(items)
}

/// A node found by a document-wide search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Category(&'a MenuCategory),
    Item(&'a MenuItem),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location<'a> {
    pub node: NodeRef<'a>,
    /// Category the node lives in (its own id for a category hit).
    pub category_id: String,
    /// Subcategory ids between the category and the node's sibling list.
    pub parent_path: Vec<String>,
    /// Position in the sibling list (in the document for a category hit).
    pub index: usize,
}

impl<'a> Location<'a> {
    pub fn item(&self) -> Option<&'a MenuItem> {
        match self.node {
            NodeRef::Item(item) => Some(item),
            NodeRef::Category(_) => None,
        }
    }

    /// Id of the direct container; `None` for a category.
    pub fn parent_id(&self) -> Option<&str> {
        match self.node {
            NodeRef::Category(_) => None,
            NodeRef::Item(_) => Some(
                self.parent_path
                    .last()
                    .map(String::as_str)
                    .unwrap_or(&self.category_id),
            ),
        }
    }
}

/// Depth-first search of the whole document by id alone; the first match
/// wins. Only meaningful while ids are unique across the document.
pub fn find_item_and_parent<'a>(menu: &'a [MenuCategory], id: &str) -> Option<Location<'a>> {
    for (index, category) in menu.iter().enumerate() {
        if category.id == id {
            return Some(Location {
                node: NodeRef::Category(category),
                category_id: category.id.clone(),
                parent_path: Vec::new(),
                index,
            });
        }

        let mut path = Vec::new();
        if let Some((item, parent_path, index)) = search_items(&category.items, id, &mut path) {
            return Some(Location {
                node: NodeRef::Item(item),
                category_id: category.id.clone(),
                parent_path,
                index,
            });
        }
    }
    None
}

fn search_items<'a>(
    items: &'a [MenuItem],
    id: &str,
    path: &mut Vec<String>,
) -> Option<(&'a MenuItem, Vec<String>, usize)> {
    for (index, item) in items.iter().enumerate() {
        if item.id == id {
            return Some((item, path.clone(), index));
        }
        if item.is_subcategory {
            path.push(item.id.clone());
            if let Some(found) = search_items(item.children(), id, path) {
                return Some(found);
            }
            path.pop();
        }
    }
    None
}
