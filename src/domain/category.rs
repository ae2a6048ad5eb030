use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A user label ("tag") grouping subscriptions.
///
/// Equality and hashing use the API tag id only; ordering is by label, then id.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    id: String,
    label: String,
    unread_count: u32,
}

impl Category {
    /// Prefix of every label tag id, e.g. `user/-/label/Tech`.
    pub const ID_PREFIX: &'static str = "user/-/label/";

    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            unread_count: 0,
        }
    }

    /// Build a category from its label alone.
    pub fn from_label(label: &str) -> Self {
        Self::new(format!("{}{}", Self::ID_PREFIX, label), label)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Unread counts are not retrieved from the API yet; always 0.
    pub fn unread_count(&self) -> u32 {
        self.unread_count
    }

    /// The stream id used to list this category's items.
    pub fn feed_address(&self) -> &str {
        &self.id
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label
            .cmp(&other.label)
            .then_with(|| self.id.cmp(&other.id))
    }
}
