use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;

use crate::domain::Category;

/// A single subscribed feed.
///
/// `id` is the part of the wire id after `feed/`. Equality and hashing use
/// the id only; ordering is by title, then id.
#[derive(Debug, Clone, Serialize)]
pub struct Subscription {
    pub id: String,
    pub title: String,
    pub url: String,
    pub html_url: String,
    pub icon_url: String,
    pub categories: BTreeSet<Arc<Category>>,
    unread_count: u32,
}

impl Subscription {
    /// Prefix of every subscription stream id.
    pub const ADDRESS_PREFIX: &'static str = "feed/";

    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: String::new(),
            html_url: String::new(),
            icon_url: String::new(),
            categories: BTreeSet::new(),
            unread_count: 0,
        }
    }

    /// Unread counts are not retrieved from the API yet; always 0.
    pub fn unread_count(&self) -> u32 {
        self.unread_count
    }

    /// The stream id used to list this subscription's items.
    pub fn feed_address(&self) -> String {
        format!("{}{}", Self::ADDRESS_PREFIX, self.id)
    }

    pub fn in_category(&self, category_id: &str) -> bool {
        self.categories.iter().any(|c| c.id() == category_id)
    }
}

impl PartialEq for Subscription {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Subscription {}

impl Hash for Subscription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Subscription {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Subscription {
    fn cmp(&self, other: &Self) -> Ordering {
        self.title
            .cmp(&other.title)
            .then_with(|| self.id.cmp(&other.id))
    }
}
