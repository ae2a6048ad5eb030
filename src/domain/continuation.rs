use chrono::{DateTime, Utc};

use crate::app::{Result, TributaryError};
use crate::domain::{Feed, ReadStatus};

/// Opaque pagination cursor, bound to the feed it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    code: i64,
    feed: Feed,
}

impl Continuation {
    pub(crate) fn new(code: i64, feed: Feed) -> Self {
        Self { code, feed }
    }

    pub(crate) fn code(&self) -> i64 {
        self.code
    }

    /// The feed this continuation was issued for.
    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// Fails unless `feed` is the stream this cursor came from.
    pub fn ensure_issued_for(&self, feed: &Feed) -> Result<()> {
        if &self.feed == feed {
            Ok(())
        } else {
            Err(TributaryError::ContinuationMismatch {
                issued_for: self.feed.feed_address().into_owned(),
                redeemed_against: feed.feed_address().into_owned(),
            })
        }
    }
}

/// One page of results and the cursor for the next page.
///
/// A missing continuation means the stream is exhausted.
#[derive(Debug, Clone)]
pub struct ListWithContinuation<T> {
    pub items: Vec<T>,
    pub continuation: Option<Continuation>,
}

impl<T> ListWithContinuation<T> {
    pub fn new(items: Vec<T>, continuation: Option<Continuation>) -> Self {
        Self {
            items,
            continuation,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.continuation.is_none()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parameters of a single page request.
#[derive(Debug, Clone)]
pub struct ItemQuery {
    /// `None` lists read and unread items together
    pub read_status: Option<ReadStatus>,
    pub older_than: Option<DateTime<Utc>>,
    pub limit: u32,
    pub continuation: Option<Continuation>,
}

impl ItemQuery {
    pub const DEFAULT_LIMIT: u32 = 20;

    pub fn new() -> Self {
        Self {
            read_status: None,
            older_than: None,
            limit: Self::DEFAULT_LIMIT,
            continuation: None,
        }
    }

    pub fn unread_only(mut self) -> Self {
        self.read_status = Some(ReadStatus::Unread);
        self
    }

    pub fn read_status(mut self, read_status: Option<ReadStatus>) -> Self {
        self.read_status = read_status;
        self
    }

    pub fn older_than(mut self, older_than: DateTime<Utc>) -> Self {
        self.older_than = Some(older_than);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn continuation(mut self, continuation: Continuation) -> Self {
        self.continuation = Some(continuation);
        self
    }

    /// The same query advanced past `page`, or `None` once the stream is exhausted.
    pub fn next_page<T>(&self, page: &ListWithContinuation<T>) -> Option<Self> {
        page.continuation.clone().map(|c| self.clone().continuation(c))
    }
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReadingList, Subscription};
    use std::sync::Arc;

    fn reading_list() -> Feed {
        Feed::from(ReadingList::new("All"))
    }

    #[test]
    fn test_redeem_against_issuing_feed() {
        let continuation = Continuation::new(42, reading_list());
        assert!(continuation.ensure_issued_for(&reading_list()).is_ok());
        assert_eq!(continuation.code(), 42);
    }

    #[test]
    fn test_redeem_against_other_feed_fails() {
        let continuation = Continuation::new(42, reading_list());
        let other = Feed::from(Arc::new(Subscription::new("abc", "Example")));

        let err = continuation.ensure_issued_for(&other).unwrap_err();
        match err {
            TributaryError::ContinuationMismatch {
                issued_for,
                redeemed_against,
            } => {
                assert_eq!(issued_for, ReadingList::ADDRESS);
                assert_eq!(redeemed_against, "feed/abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_exhausted_without_continuation() {
        let page: ListWithContinuation<u32> = ListWithContinuation::new(vec![1, 2], None);
        assert!(page.is_exhausted());
        assert_eq!(page.len(), 2);
        assert!(ItemQuery::new().next_page(&page).is_none());
    }

    #[test]
    fn test_next_page_keeps_parameters() {
        let query = ItemQuery::new().unread_only().limit(5);
        let page: ListWithContinuation<u32> =
            ListWithContinuation::new(vec![], Some(Continuation::new(7, reading_list())));

        let next = query.next_page(&page).unwrap();
        assert_eq!(next.limit, 5);
        assert_eq!(next.read_status, Some(ReadStatus::Unread));
        assert_eq!(next.continuation.map(|c| c.code()), Some(7));
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(ItemQuery::default().limit, 20);
        assert!(ItemQuery::default().read_status.is_none());
    }
}
