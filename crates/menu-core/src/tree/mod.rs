//! Ordered-tree operations over the menu document.
//!
//! Every function here takes an immutable snapshot (`&[MenuCategory]`) and
//! returns a fresh one, so the caller can persist the result as a whole and
//! discard it if the write fails.

pub mod breadcrumb;
pub mod ids;
pub mod mutator;
pub mod reorder;
pub mod resolver;
pub mod search;

pub use breadcrumb::{build_path, Crumb};
pub use ids::IdAllocator;
pub use mutator::{
    create_category, delete_category, delete_item, duplicate_item, insert_item, toggle_visibility,
    update_category, update_item, Duplicated, Removal,
};
pub use reorder::{
    move_category, move_dragged, move_sibling_item, reorder_category, reorder_item, Direction,
    DragKind, DragRef,
};
pub use resolver::{find_item_and_parent, resolve, Location, NodeRef, Resolved};
pub use search::{public_menu, search, sorted_view, FilterType, SearchResult, SortType};

use crate::domain::{MenuCategory, MenuItem};

/// Element of a sibling list: carries an id and a dense `order` rank.
pub trait Sibling {
    fn id(&self) -> &str;
    fn set_order(&mut self, order: usize);
}

impl Sibling for MenuItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

impl Sibling for MenuCategory {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

/// Rewrites `order` to match array position.
pub fn renumber<T: Sibling>(list: &mut [T]) {
    for (index, node) in list.iter_mut().enumerate() {
        node.set_order(index);
    }
}

pub(crate) fn position<T: Sibling>(list: &[T], id: &str) -> Option<usize> {
    list.iter().position(|node| node.id() == id)
}

/// Total number of nodes (categories and items) in the document.
pub fn node_count(menu: &[MenuCategory]) -> usize {
    menu.iter().map(MenuCategory::subtree_size).sum()
}
