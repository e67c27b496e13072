//! Read-only projections: admin search, sorted views and the public menu.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{MenuCategory, MenuItem};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    All,
    /// Subcategories only.
    Categories,
    /// Dishes only.
    Items,
    /// Nodes hidden from the public menu.
    Hidden,
}

impl FilterType {
    fn accepts(self, item: &MenuItem) -> bool {
        match self {
            FilterType::All => true,
            FilterType::Categories => item.is_subcategory,
            FilterType::Items => !item.is_subcategory,
            FilterType::Hidden => !item.is_visible,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    Name,
    /// Most recently modified first; undated nodes last.
    Date,
    #[default]
    Order,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(flatten)]
    pub item: MenuItem,
    pub category_id: String,
    pub category_name: String,
    /// Subcategory ids leading to the item's sibling list.
    pub path: Vec<String>,
    /// Category name followed by the subcategory names on `path`.
    pub breadcrumbs: Vec<String>,
}

/// Every node whose name contains `query` (case-insensitive) and passes
/// `filter`, in depth-first document order. An empty query matches all.
pub fn search(menu: &[MenuCategory], query: &str, filter: FilterType) -> Vec<SearchResult> {
    let needle = query.trim().to_lowercase();
    let mut hits = Vec::new();

    for category in menu {
        let mut walk = Walk {
            category,
            needle: &needle,
            filter,
            path: Vec::new(),
            names: vec![category.name.clone()],
        };
        walk.visit(&category.items, &mut hits);
    }
    hits
}

struct Walk<'a> {
    category: &'a MenuCategory,
    needle: &'a str,
    filter: FilterType,
    path: Vec<String>,
    names: Vec<String>,
}

impl Walk<'_> {
    fn visit(&mut self, items: &[MenuItem], hits: &mut Vec<SearchResult>) {
        for item in items {
            let matches = self.needle.is_empty() || item.name.to_lowercase().contains(self.needle);
            if matches && self.filter.accepts(item) {
                hits.push(SearchResult {
                    item: item.clone(),
                    category_id: self.category.id.clone(),
                    category_name: self.category.name.clone(),
                    path: self.path.clone(),
                    breadcrumbs: self.names.clone(),
                });
            }

            if item.is_subcategory {
                self.path.push(item.id.clone());
                self.names.push(item.name.clone());
                self.visit(item.children(), hits);
                self.path.pop();
                self.names.pop();
            }
        }
    }
}

trait SortKey {
    fn name(&self) -> &str;
    fn last_modified(&self) -> Option<DateTime<Utc>>;
    fn order(&self) -> usize;
}

impl SortKey for MenuItem {
    fn name(&self) -> &str {
        &self.name
    }
    fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }
    fn order(&self) -> usize {
        self.order
    }
}

impl SortKey for MenuCategory {
    fn name(&self) -> &str {
        &self.name
    }
    fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }
    fn order(&self) -> usize {
        self.order
    }
}

fn compare<T: SortKey>(sort: SortType, a: &T, b: &T) -> Ordering {
    match sort {
        SortType::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        SortType::Date => match (a.last_modified(), b.last_modified()) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortType::Order => a.order().cmp(&b.order()),
    }
}

fn sort_items(items: &mut [MenuItem], sort: SortType) {
    items.sort_by(|a, b| compare(sort, a, b));
    for item in items.iter_mut() {
        if let Some(children) = item.items.as_mut() {
            sort_items(children, sort);
        }
    }
}

/// Copy of the document with every sibling list sorted. `order` fields are
/// left as stored.
pub fn sorted_view(menu: &[MenuCategory], sort: SortType) -> Vec<MenuCategory> {
    let mut view = menu.to_vec();
    view.sort_by(|a, b| compare(sort, a, b));
    for category in &mut view {
        sort_items(&mut category.items, sort);
    }
    view
}

/// Landing-page projection: hidden nodes are pruned at every depth and each
/// list is sorted by `order`.
pub fn public_menu(menu: &[MenuCategory]) -> Vec<MenuCategory> {
    let mut visible: Vec<MenuCategory> = menu
        .iter()
        .filter(|category| category.is_visible)
        .cloned()
        .map(|mut category| {
            category.items = visible_items(&category.items);
            category
        })
        .collect();
    visible.sort_by_key(|category| category.order);
    visible
}

fn visible_items(items: &[MenuItem]) -> Vec<MenuItem> {
    let mut visible: Vec<MenuItem> = items
        .iter()
        .filter(|item| item.is_visible)
        .cloned()
        .map(|mut item| {
            if let Some(children) = item.items.take() {
                item.items = Some(visible_items(&children));
            }
            item
        })
        .collect();
    visible.sort_by_key(|item| item.order);
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures::{self, ids};
    use chrono::TimeZone;

    fn hit_ids(hits: &[SearchResult]) -> Vec<&str> {
        hits.iter().map(|hit| hit.item.id.as_str()).collect()
    }

    #[test]
    fn test_search_by_name() {
        let mut menu = fixtures::menu();
        menu[0].items[1].items.as_mut().unwrap()[0].name = "Борщ".to_string();

        let hits = search(&menu, "БОРЩ", FilterType::All);
        assert_eq!(hit_ids(&hits), vec!["b"]);
        assert_eq!(hits[0].category_name, "Category c1");
        assert_eq!(hits[0].path, vec!["s1".to_string()]);
        assert_eq!(hits[0].breadcrumbs, vec!["Category c1", "Sub s1"]);
    }

    #[test]
    fn test_search_filters() {
        let mut menu = fixtures::menu();
        menu[1].items[0].is_visible = false;

        assert_eq!(hit_ids(&search(&menu, "", FilterType::All)).len(), 7);
        assert_eq!(hit_ids(&search(&menu, "", FilterType::Categories)), vec!["s1", "s2"]);
        assert_eq!(
            hit_ids(&search(&menu, "dish", FilterType::Items)),
            vec!["a", "b", "c", "d", "e"]
        );
        assert_eq!(hit_ids(&search(&menu, "", FilterType::Hidden)), vec!["e"]);
    }

    #[test]
    fn test_sorted_view_by_name() {
        let mut menu = fixtures::menu();
        menu[0].items[0].name = "zucchini".to_string();
        let view = sorted_view(&menu, SortType::Name);
        assert_eq!(ids(&view[0].items), vec!["d", "s1", "a"]);
        // stored ranks are not rewritten
        assert_eq!(view[0].items[2].order, 0);
    }

    #[test]
    fn test_sorted_view_by_date() {
        let mut menu = fixtures::menu();
        let items = &mut menu[0].items;
        items[0].last_modified = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        items[1].last_modified = None;
        items[2].last_modified = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());

        menu[0].last_modified = Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
        menu[1].last_modified = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());

        let view = sorted_view(&menu, SortType::Date);
        let categories: Vec<&str> = view.iter().map(|category| category.id.as_str()).collect();
        assert_eq!(categories, vec!["c2", "c1"]);
        let hot = view.iter().find(|category| category.id == "c1").unwrap();
        assert_eq!(ids(&hot.items), vec!["d", "a", "s1"]);
    }

    #[test]
    fn test_sorted_view_by_date_puts_undated_categories_last() {
        let mut menu = fixtures::menu();
        menu[0].last_modified = None;
        menu[1].last_modified = Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());

        let view = sorted_view(&menu, SortType::Date);
        assert_eq!(view[0].id, "c2");
        assert_eq!(view[1].id, "c1");
    }

    #[test]
    fn test_public_menu_prunes_hidden() {
        let mut menu = fixtures::menu();
        menu[1].is_visible = false;
        menu[0].items[1].items.as_mut().unwrap()[1].is_visible = false;
        menu[0].items[0].is_visible = false;

        let public = public_menu(&menu);
        assert_eq!(public.len(), 1);
        assert_eq!(ids(&public[0].items), vec!["s1", "d"]);
        assert_eq!(ids(public[0].items[0].children()), vec!["b"]);
    }
}
