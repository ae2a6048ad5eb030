use std::collections::HashMap;
use std::sync::Arc;

/// Immutable snapshot of the subscriptions or categories known to a session.
///
/// A refresh builds a whole new index and swaps it in; readers keep the
/// snapshot they loaded for as long as they need it.
#[derive(Debug)]
pub struct FeedIndex<T> {
    version: u64,
    by_id: HashMap<String, Arc<T>>,
}

impl<T> FeedIndex<T> {
    /// The index a session starts with, before any listing call.
    pub fn empty() -> Self {
        Self {
            version: 0,
            by_id: HashMap::new(),
        }
    }

    /// Build the successor of `previous` from freshly listed entries.
    pub fn next(
        previous: &FeedIndex<T>,
        entries: impl IntoIterator<Item = (String, Arc<T>)>,
    ) -> Self {
        Self {
            version: previous.version + 1,
            by_id: entries.into_iter().collect(),
        }
    }

    /// 0 until the first listing call completes.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.by_id.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &Arc<T>> {
        self.by_id.values()
    }
}

impl<T> Default for FeedIndex<T> {
    fn default() -> Self {
        Self::empty()
    }
}
