//! # Menu Core - Domain Module
//!
//! Entities stored in the menu document.

pub mod menu_category;
pub mod menu_item;

pub use menu_category::{CategoryPatch, MenuCategory};
pub use menu_item::{MenuItem, MenuItemPatch, Nutrition};

/// Default name of a freshly added dish.
pub const NEW_DISH_NAME: &str = "Новое блюдо";

/// Default name of a freshly added subcategory.
pub const NEW_SUBCATEGORY_NAME: &str = "Новая подкатегория";

/// Default name offered for a new category.
pub const NEW_CATEGORY_NAME: &str = "Новая категория";

/// Suffix appended to the name of a duplicated node.
pub const COPY_SUFFIX: &str = " (копия)";

pub(crate) fn default_visible() -> bool {
    true
}
