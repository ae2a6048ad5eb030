use std::borrow::Cow;
use std::sync::Arc;

use crate::app::Result;
use crate::domain::{Category, ItemQuery, ItemWithStatus, ListWithContinuation, Subscription};
use crate::sync::SyncEngine;

/// The aggregate stream of every item across all subscriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingList {
    pub title: String,
}

impl ReadingList {
    pub const ADDRESS: &'static str = "user/-/state/com.google/reading-list";

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Any addressable item stream.
///
/// Two feeds are equal when they address the same stream, whatever their
/// titles say.
#[derive(Debug, Clone)]
pub enum Feed {
    ReadingList(ReadingList),
    Category(Arc<Category>),
    Subscription(Arc<Subscription>),
}

impl Feed {
    pub fn title(&self) -> &str {
        match self {
            Feed::ReadingList(list) => &list.title,
            Feed::Category(category) => category.label(),
            Feed::Subscription(subscription) => &subscription.title,
        }
    }

    /// The API stream id of this feed.
    pub fn feed_address(&self) -> Cow<'_, str> {
        match self {
            Feed::ReadingList(_) => Cow::Borrowed(ReadingList::ADDRESS),
            Feed::Category(category) => Cow::Borrowed(category.feed_address()),
            Feed::Subscription(subscription) => Cow::Owned(subscription.feed_address()),
        }
    }

    pub fn unread_count(&self) -> u32 {
        match self {
            Feed::ReadingList(_) => 0,
            Feed::Category(category) => category.unread_count(),
            Feed::Subscription(subscription) => subscription.unread_count(),
        }
    }

    /// Fetch one page of this feed's items.
    pub async fn items(
        &self,
        engine: &SyncEngine,
        query: ItemQuery,
    ) -> Result<ListWithContinuation<ItemWithStatus>> {
        engine.get_items(self, query).await
    }
}

impl PartialEq for Feed {
    fn eq(&self, other: &Self) -> bool {
        self.feed_address() == other.feed_address()
    }
}

impl Eq for Feed {}

impl From<ReadingList> for Feed {
    fn from(list: ReadingList) -> Self {
        Feed::ReadingList(list)
    }
}

impl From<Arc<Category>> for Feed {
    fn from(category: Arc<Category>) -> Self {
        Feed::Category(category)
    }
}

impl From<Arc<Subscription>> for Feed {
    fn from(subscription: Arc<Subscription>) -> Self {
        Feed::Subscription(subscription)
    }
}
