use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::Item;

/// Session cache of items already fetched from the content endpoint.
///
/// Entries are never evicted or replaced: the first item stored under an id
/// is the one every later lookup returns.
#[derive(Debug, Default)]
pub struct ItemCache {
    items: Mutex<HashMap<String, Arc<Item>>>,
}

impl ItemCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Arc<Item>> {
        self.lock().get(id).cloned()
    }

    /// Store `item` unless its id is already cached, returning the cached entry.
    pub fn insert(&self, item: Item) -> Arc<Item> {
        self.lock()
            .entry(item.id.clone())
            .or_insert_with(|| Arc::new(item))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Entries are immutable and only ever added, so a panic mid-insert
    // cannot leave the map inconsistent.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Item>>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::tests::item;

    #[test]
    fn test_get_missing() {
        let cache = ItemCache::new();
        assert!(cache.get("nope").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_then_get_same_entry() {
        let cache = ItemCache::new();
        let stored = cache.insert(item("a", 1000));
        let fetched = cache.get("a").unwrap();

        assert!(Arc::ptr_eq(&stored, &fetched));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = ItemCache::new();
        let first = cache.insert(item("a", 1000));

        let mut second = item("a", 9000);
        second.title = "Replacement".into();
        let returned = cache.insert(second);

        assert!(Arc::ptr_eq(&first, &returned));
        assert_eq!(cache.get("a").unwrap().title, "Item a");
        assert_eq!(cache.len(), 1);
    }
}
