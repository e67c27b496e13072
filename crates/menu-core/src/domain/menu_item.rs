// ============================================================================
// Menu Core - Menu Item Entity
// File: crates/menu-core/src/domain/menu_item.rs
// Description: Dish / subcategory node of the menu tree
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::default_visible;
use crate::slug::generate_slug;

/// Nutrition facts of a dish, per serving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Nutrition {
    #[serde(default, deserialize_with = "null_as_zero")]
    #[validate(range(min = 0.0, message = "Calories must be non-negative"))]
    pub calories: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    #[validate(range(min = 0.0, message = "Protein must be non-negative"))]
    pub protein: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    #[validate(range(min = 0.0, message = "Fats must be non-negative"))]
    pub fats: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    #[validate(range(min = 0.0, message = "Carbs must be non-negative"))]
    pub carbs: f64,
}

// Browsers serialize an unparsable number field as `null`.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// A node below a category: either a dish or a subcategory.
///
/// `items` is present iff `is_subcategory` is set. Dish-only fields on a
/// subcategory are carried through untouched but carry no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Reference to a stored upload, e.g. `/uploads/1700000000000.jpg`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,

    #[serde(default)]
    pub is_subcategory: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<MenuItem>>,

    #[serde(default)]
    pub order: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default = "default_visible")]
    pub is_visible: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl MenuItem {
    /// A dish with empty text fields and zeroed nutrition.
    pub fn dish(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: Some(generate_slug(&name)),
            name,
            price: Some(String::new()),
            description: Some(String::new()),
            image: Some(String::new()),
            weight: Some(String::new()),
            nutrition: Some(Nutrition::default()),
            is_subcategory: false,
            items: None,
            order: 0,
            is_visible: true,
            last_modified: Some(Utc::now()),
        }
    }

    /// An empty subcategory.
    pub fn subcategory(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: Some(generate_slug(&name)),
            name,
            price: None,
            description: None,
            image: None,
            weight: None,
            nutrition: None,
            is_subcategory: true,
            items: Some(Vec::new()),
            order: 0,
            is_visible: true,
            last_modified: Some(Utc::now()),
        }
    }

    /// Children of a subcategory; empty for dishes.
    pub fn children(&self) -> &[MenuItem] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Non-empty image reference, if any.
    pub fn image_ref(&self) -> Option<&str> {
        self.image.as_deref().filter(|image| !image.is_empty())
    }

    /// Appends every image reference in this subtree, parent before children.
    pub fn collect_images(&self, out: &mut Vec<String>) {
        if let Some(image) = self.image_ref() {
            out.push(image.to_string());
        }
        for child in self.children() {
            child.collect_images(out);
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_size(&self) -> usize {
        1 + self.children().iter().map(MenuItem::subtree_size).sum::<usize>()
    }

    /// Shallow merge: every field present in the patch replaces the stored
    /// value wholesale.
    pub fn apply(&mut self, patch: &MenuItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(price) = &patch.price {
            self.price = Some(price.clone());
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(image) = &patch.image {
            self.image = Some(image.clone());
        }
        if let Some(weight) = &patch.weight {
            self.weight = Some(weight.clone());
        }
        if let Some(nutrition) = patch.nutrition {
            self.nutrition = Some(nutrition);
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

/// Partial update of a [`MenuItem`]. Structural fields (`id`, `items`,
/// `isSubcategory`, `order`) cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub weight: Option<String>,
    #[validate(nested)]
    pub nutrition: Option<Nutrition>,
    pub slug: Option<String>,
    pub is_visible: Option<bool>,
    pub last_modified: Option<DateTime<Utc>>,
}
