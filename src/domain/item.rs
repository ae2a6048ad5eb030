use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Category, ReadStatus, Subscription};

/// A single post.
///
/// Items are built once from a content response, shared through the item
/// cache and never modified afterwards. Read status travels next to the item
/// in [`ItemWithStatus`] rather than inside it.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub canonical_link: String,
    pub alternate_link: String,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub crawled: DateTime<Utc>,
    /// HTML summary as delivered by the service
    pub summary: String,
    pub author: String,
    pub categories: BTreeSet<Arc<Category>>,
    pub subscription: Arc<Subscription>,
}

impl Item {
    /// Prefix of the long-form item id used in content responses.
    pub const ID_PREFIX: &'static str = "tag:google.com,2005:reader/item/";

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// Prefer the alternate (human-facing) link, fall back to canonical.
    pub fn link(&self) -> &str {
        if self.alternate_link.is_empty() {
            &self.canonical_link
        } else {
            &self.alternate_link
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        self.published
            .cmp(&other.published)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// A cached item paired with the read status reported by one listing.
#[derive(Debug, Clone, Serialize)]
pub struct ItemWithStatus {
    #[serde(flatten)]
    pub item: Arc<Item>,
    pub read_status: ReadStatus,
}

impl ItemWithStatus {
    pub fn new(item: Arc<Item>, read_status: ReadStatus) -> Self {
        Self { item, read_status }
    }

    pub fn is_read(&self) -> bool {
        self.read_status.is_read()
    }
}

impl Deref for ItemWithStatus {
    type Target = Item;

    fn deref(&self) -> &Item {
        &self.item
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn item(id: &str, published_ms: i64) -> Item {
        let at = Utc.timestamp_millis_opt(published_ms).unwrap();
        Item {
            id: id.to_string(),
            title: format!("Item {}", id),
            canonical_link: format!("https://example.com/{}", id),
            alternate_link: String::new(),
            published: at,
            updated: at,
            crawled: at,
            summary: String::new(),
            author: String::new(),
            categories: BTreeSet::new(),
            subscription: Arc::new(Subscription::new("abc", "Example")),
        }
    }

    #[test]
    fn test_ordering_published_then_id() {
        let mut items = vec![item("b", 2000), item("c", 1000), item("a", 2000)];
        items.sort();

        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_equality_by_id_only() {
        let a = item("x", 1000);
        let mut b = item("x", 5000);
        b.title = "Different".into();
        assert_eq!(a, b);
        assert_ne!(a, item("y", 1000));
    }

    #[test]
    fn test_display_title_without_title() {
        let mut it = item("x", 0);
        it.title.clear();
        assert_eq!(it.display_title(), "(Untitled)");
    }

    #[test]
    fn test_link_prefers_alternate() {
        let mut it = item("x", 0);
        assert_eq!(it.link(), "https://example.com/x");
        it.alternate_link = "https://example.com/alt".into();
        assert_eq!(it.link(), "https://example.com/alt");
    }

    #[test]
    fn test_status_does_not_touch_item() {
        let shared = Arc::new(item("x", 0));
        let read = ItemWithStatus::new(shared.clone(), ReadStatus::Read);
        let unread = ItemWithStatus::new(shared.clone(), ReadStatus::Unread);

        assert!(read.is_read());
        assert!(!unread.is_read());
        assert!(Arc::ptr_eq(&read.item, &unread.item));
        assert_eq!(unread.display_title(), "Item x");
    }
}
