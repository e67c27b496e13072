//! Navigation trail for the admin UI.

use serde::{Deserialize, Serialize};

use crate::domain::MenuCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crumb {
    pub id: String,
    pub name: String,
    /// Set on subcategory crumbs; the category crumb itself has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// Category crumb followed by one crumb per resolved path segment.
///
/// Never fails: an unknown category yields an empty trail, and the walk stops
/// at the first path id that is not a subcategory of the current level.
pub fn build_path(menu: &[MenuCategory], category_id: &str, parent_path: &[String]) -> Vec<Crumb> {
    let Some(category) = menu.iter().find(|category| category.id == category_id) else {
        return Vec::new();
    };

    let mut trail = vec![Crumb {
        id: category.id.clone(),
        name: category.name.clone(),
        category_id: None,
    }];

    let mut items = category.items.as_slice();
    for id in parent_path {
        let Some(node) = items.iter().find(|item| &item.id == id && item.is_subcategory) else {
            break;
        };
        trail.push(Crumb {
            id: node.id.clone(),
            name: node.name.clone(),
            category_id: Some(category_id.to_string()),
        });
        items = node.children();
    }

    trail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures::{self, path};

    fn crumb_ids(trail: &[Crumb]) -> Vec<&str> {
        trail.iter().map(|crumb| crumb.id.as_str()).collect()
    }

    #[test]
    fn test_full_trail() {
        let menu = fixtures::menu();
        let trail = build_path(&menu, "c1", &path(&["s1", "s2"]));
        assert_eq!(crumb_ids(&trail), vec!["c1", "s1", "s2"]);
        assert_eq!(trail[0].category_id, None);
        assert_eq!(trail[2].category_id.as_deref(), Some("c1"));
        assert_eq!(trail[1].name, "Sub s1");
    }

    #[test]
    fn test_degrades_on_bogus_segment() {
        let menu = fixtures::menu();
        let trail = build_path(&menu, "c1", &path(&["s1", "bogus"]));
        assert_eq!(crumb_ids(&trail), vec!["c1", "s1"]);

        // the walk does not resume after a miss
        let trail = build_path(&menu, "c1", &path(&["bogus", "s1"]));
        assert_eq!(crumb_ids(&trail), vec!["c1"]);
    }

    #[test]
    fn test_dish_in_path_stops_walk() {
        let menu = fixtures::menu();
        let trail = build_path(&menu, "c1", &path(&["a"]));
        assert_eq!(crumb_ids(&trail), vec!["c1"]);
    }

    #[test]
    fn test_unknown_category() {
        let menu = fixtures::menu();
        assert!(build_path(&menu, "ghost", &path(&["s1"])).is_empty());
    }
}
