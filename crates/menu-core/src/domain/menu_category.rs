//! Top-level menu category

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::default_visible;
use super::menu_item::MenuItem;
use crate::slug::generate_slug;

/// Root-level node of the menu document. Always owns an `items` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub items: Vec<MenuItem>,

    #[serde(default)]
    pub order: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default = "default_visible")]
    pub is_visible: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl MenuCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: Some(generate_slug(&name)),
            name,
            items: Vec::new(),
            order: 0,
            is_visible: true,
            last_modified: Some(Utc::now()),
        }
    }

    /// Every image reference held anywhere in this category.
    pub fn collect_images(&self, out: &mut Vec<String>) {
        for item in &self.items {
            item.collect_images(out);
        }
    }

    /// Number of nodes in this category, including the category itself.
    pub fn subtree_size(&self) -> usize {
        1 + self.items.iter().map(MenuItem::subtree_size).sum::<usize>()
    }

    pub fn apply(&mut self, patch: &CategoryPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(slug) = &patch.slug {
            self.slug = Some(slug.clone());
        }
        if let Some(is_visible) = patch.is_visible {
            self.is_visible = is_visible;
        }
        if let Some(last_modified) = patch.last_modified {
            self.last_modified = Some(last_modified);
        }
    }
}

/// Partial update of a [`MenuCategory`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,
    pub slug: Option<String>,
    pub is_visible: Option<bool>,
    pub last_modified: Option<DateTime<Utc>>,
}
