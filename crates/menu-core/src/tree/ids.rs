//! Timestamp-derived node ids.

use std::collections::HashSet;

use chrono::Utc;

use crate::domain::{MenuCategory, MenuItem};

/// Hands out decimal unix-millisecond ids that are unused in a document.
///
/// Seeded with every id already present, so ids handed out in the same
/// millisecond (or colliding with older nodes) are bumped forward.
#[derive(Debug)]
pub struct IdAllocator {
    taken: HashSet<String>,
    next: i64,
}

impl IdAllocator {
    pub fn for_menu(menu: &[MenuCategory]) -> Self {
        Self::starting_at(menu, Utc::now().timestamp_millis())
    }

    pub fn starting_at(menu: &[MenuCategory], start: i64) -> Self {
        let mut taken = HashSet::new();
        for category in menu {
            taken.insert(category.id.clone());
            collect_ids(&category.items, &mut taken);
        }
        Self { taken, next: start }
    }

    pub fn allocate(&mut self) -> String {
        loop {
            let candidate = self.next.to_string();
            self.next += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Gives `item` and all of its descendants fresh ids.
    pub fn reassign(&mut self, item: &mut MenuItem) {
        item.id = self.allocate();
        if let Some(children) = item.items.as_mut() {
            for child in children {
                self.reassign(child);
            }
        }
    }
}

fn collect_ids(items: &[MenuItem], taken: &mut HashSet<String>) {
    for item in items {
        taken.insert(item.id.clone());
        collect_ids(item.children(), taken);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures;

    #[test]
    fn test_skips_taken_ids() {
        let mut menu = fixtures::menu();
        menu[0].items[0].id = "1000".to_string();
        menu[1].id = "1001".to_string();

        let mut ids = IdAllocator::starting_at(&menu, 1000);
        assert_eq!(ids.allocate(), "1002");
        assert_eq!(ids.allocate(), "1003");
    }

    #[test]
    fn test_reassign_subtree() {
        let menu = fixtures::menu();
        let mut soups = menu[0].items[1].clone();
        let mut ids = IdAllocator::starting_at(&menu, 5);
        ids.reassign(&mut soups);

        assert_eq!(soups.id, "5");
        assert_eq!(soups.children()[0].id, "6");
        assert_eq!(soups.children()[1].id, "7");
        assert_eq!(soups.children()[1].children()[0].id, "8");
    }
}
