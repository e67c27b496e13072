//! Structural invariants of the tree engine, exercised through the public API
//! on a document parsed from its stored JSON form.

use menu_core::tree::{self, node_count, Direction, DragKind, DragRef, FilterType};
use menu_core::{MenuCategory, MenuError, MenuItem};
use serde_json::json;

fn stored_menu() -> Vec<MenuCategory> {
    serde_json::from_value(json!([
        {
            "id": "1", "name": "Горячее", "order": 0,
            "items": [
                { "id": "10", "name": "Котлета", "price": "350", "image": "/uploads/10.jpg", "order": 0 },
                { "id": "11", "name": "Супы", "isSubcategory": true, "order": 1, "items": [
                    { "id": "110", "name": "Борщ", "image": "/uploads/110.jpg", "order": 0 },
                    { "id": "111", "name": "Холодные", "isSubcategory": true, "order": 1, "items": [
                        { "id": "1110", "name": "Окрошка", "image": "/uploads/1110.jpg", "order": 0 }
                    ]}
                ]},
                { "id": "12", "name": "Плов", "order": 2, "isVisible": false }
            ]
        },
        {
            "id": "2", "name": "Напитки", "order": 1,
            "items": [
                { "id": "20", "name": "Морс", "order": 0 },
                { "id": "21", "name": "Компот", "order": 1 },
                { "id": "22", "name": "Квас", "order": 2 }
            ]
        }
    ]))
    .expect("fixture parses")
}

fn path(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn assert_dense(items: &[MenuItem]) {
    for (index, item) in items.iter().enumerate() {
        assert_eq!(item.order, index, "order of {} is not dense", item.id);
        assert_dense(item.children());
    }
}

fn all_ids(menu: &[MenuCategory]) -> Vec<String> {
    fn visit(items: &[MenuItem], out: &mut Vec<String>) {
        for item in items {
            out.push(item.id.clone());
            visit(item.children(), out);
        }
    }
    let mut out = Vec::new();
    for category in menu {
        out.push(category.id.clone());
        visit(&category.items, &mut out);
    }
    out
}

#[test]
fn test_missing_visibility_defaults_to_true() {
    let menu = stored_menu();
    assert!(menu[0].is_visible);
    assert!(menu[0].items[0].is_visible);
    assert!(!menu[0].items[2].is_visible);
}

#[test]
fn test_insert_adds_exactly_one_node() {
    let menu = stored_menu();
    let node = MenuItem::dish("900", "Новое блюдо");
    let next = tree::insert_item(&menu, "1", &path(&["11", "111"]), node, false).unwrap();

    assert_eq!(node_count(&next), node_count(&menu) + 1);
    let cold = &next[0].items[1].children()[1];
    assert_eq!(cold.children().last().unwrap().order, 1);
}

#[test]
fn test_delete_removes_whole_subtree() {
    let menu = stored_menu();
    let removal = tree::delete_item(&menu, "1", "11", &[]).unwrap();

    assert_eq!(removal.removed_nodes, 4);
    assert_eq!(node_count(&removal.menu), node_count(&menu) - 4);
    assert_eq!(removal.images, vec!["/uploads/110.jpg", "/uploads/1110.jpg"]);
    assert_dense(&removal.menu[0].items);
}

#[test]
fn test_duplicate_keeps_ids_unique() {
    let menu = stored_menu();
    let duplicated = tree::duplicate_item(&menu, "1", "11", &[]).unwrap();

    let ids = all_ids(&duplicated.menu);
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(ids.len(), unique.len());
    assert_eq!(node_count(&duplicated.menu), node_count(&menu) + 4);
    assert_eq!(duplicated.menu[0].items[3].name, "Супы (копия)");
}

#[test]
fn test_moves_keep_order_dense() {
    let menu = stored_menu();
    let moved = tree::move_sibling_item(&menu, "2", &[], 0, 3).unwrap();
    let names: Vec<_> = moved[1].items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["Компот", "Квас", "Морс"]);
    assert_dense(&moved[1].items);

    let swapped = tree::reorder_item(&moved, "2", "20", &[], Direction::Up).unwrap();
    assert_eq!(swapped[1].items[1].id, "20");
    assert_dense(&swapped[1].items);
}

#[test]
fn test_drag_across_containers_leaves_menu_untouched() {
    let menu = stored_menu();
    let dragged = DragRef {
        id: "10".to_string(),
        kind: DragKind::Item,
        category_id: Some("1".to_string()),
        parent_path: vec![],
    };
    let target = DragRef {
        id: "20".to_string(),
        kind: DragKind::Item,
        category_id: Some("2".to_string()),
        parent_path: vec![],
    };

    let err = tree::move_dragged(&menu, &dragged, &target).unwrap_err();
    assert!(matches!(err, MenuError::CrossContainerMove { .. }));
}

#[test]
fn test_public_menu_prunes_hidden_nodes() {
    let menu = stored_menu();
    let hidden = tree::toggle_visibility(&menu, "1", "111", &path(&["11"])).unwrap();
    let public = tree::public_menu(&hidden);

    let ids = all_ids(&public);
    assert!(!ids.contains(&"12".to_string()));
    assert!(!ids.contains(&"111".to_string()));
    assert!(!ids.contains(&"1110".to_string()));
    assert!(ids.contains(&"110".to_string()));
}

#[test]
fn test_search_reports_location() {
    let menu = stored_menu();
    let hits = tree::search(&menu, "окрош", FilterType::All);

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].category_id, "1");
    assert_eq!(hits[0].path, vec!["11", "111"]);
}

#[test]
fn test_round_trip_preserves_document() {
    let menu = stored_menu();
    let text = serde_json::to_string_pretty(&menu).unwrap();
    let back: Vec<MenuCategory> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, menu);
}
