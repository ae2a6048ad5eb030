//! Retrieval and reconciliation against a Google Reader compatible API.
//!
//! Items are fetched in two phases: a page of ids from the id-listing
//! endpoint, then the content of every id the [`ItemCache`] does not already
//! hold, in one bulk request. Read status comes from a second, unread-only id
//! listing and is returned next to each shared item.

pub mod endpoints;
pub mod ids;
#[cfg(test)]
pub(crate) mod mock;
pub mod wire;

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::app::{ApiParseError, Result, TributaryError};
use crate::domain::{
    Category, Continuation, Feed, Item, ItemQuery, ItemWithStatus, ListWithContinuation,
    ReadStatus, ReaderService, ReadingList, Subscription,
};
use crate::fetcher::Transport;
use crate::store::{FeedIndex, ItemCache};

use endpoints::Endpoints;
use wire::{ItemContents, ItemRefs, SubscriptionList, TagList, WireItem, WireSubscription};

/// One account session against a reader service.
///
/// Subscriptions and categories are held as immutable snapshots that each
/// listing call replaces wholesale; items are cached for the whole session.
/// All methods take `&self` and may be called from several tasks at once.
pub struct SyncEngine {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
    subscriptions: RwLock<Arc<FeedIndex<Subscription>>>,
    categories: RwLock<Arc<FeedIndex<Category>>>,
    reading_list_title: Mutex<Option<String>>,
    item_cache: ItemCache,
}

impl SyncEngine {
    pub fn new(service: &ReaderService, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            transport,
            endpoints: Endpoints::new(&service.base_url)?,
            subscriptions: RwLock::new(Arc::new(FeedIndex::empty())),
            categories: RwLock::new(Arc::new(FeedIndex::empty())),
            reading_list_title: Mutex::new(None),
            item_cache: ItemCache::new(),
        })
    }

    /// Fetch the account's subscriptions, replacing the known set.
    ///
    /// Unread counts are not requested and stay at 0.
    pub async fn list_subscriptions(&self) -> Result<Vec<Arc<Subscription>>> {
        let response: SubscriptionList = self.get(&self.endpoints.subscription_list()?).await?;
        let known_categories = self.category_snapshot();

        let mut entries = Vec::with_capacity(response.subscriptions.len());
        for wire in response.subscriptions {
            let subscription = subscription_from_wire(wire, &known_categories)?;
            entries.push((subscription.id.clone(), Arc::new(subscription)));
        }

        let index = replace(&self.subscriptions, entries);
        debug!(
            count = index.len(),
            version = index.version(),
            "Subscriptions refreshed"
        );
        Ok(sorted(&index))
    }

    /// Fetch the account's label categories, replacing the known set.
    pub async fn list_categories(&self) -> Result<Vec<Arc<Category>>> {
        let response: TagList = self.get(&self.endpoints.tag_list()?).await?;

        let mut entries = Vec::with_capacity(response.tags.len());
        for tag in response.tags {
            let label = ids::category_label(&tag.id)?.to_string();
            entries.push((tag.id.clone(), Arc::new(Category::new(tag.id, label))));
        }

        let index = replace(&self.categories, entries);
        debug!(
            count = index.len(),
            version = index.version(),
            "Categories refreshed"
        );
        Ok(sorted(&index))
    }

    /// List categories, then subscriptions, so items can be resolved against both.
    pub async fn sync_feeds(&self) -> Result<(Vec<Arc<Category>>, Vec<Arc<Subscription>>)> {
        let categories = self.list_categories().await?;
        let subscriptions = self.list_subscriptions().await?;
        Ok((categories, subscriptions))
    }

    /// The session's reading list, retitled to `title`.
    pub fn reading_list(&self, title: &str) -> Feed {
        let mut current = self
            .reading_list_title
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *current = Some(title.to_string());
        Feed::ReadingList(ReadingList::new(title))
    }

    /// The reading list handed out by [`reading_list`](Self::reading_list), if any.
    pub fn current_reading_list(&self) -> Option<Feed> {
        self.reading_list_title
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
            .map(|title| Feed::ReadingList(ReadingList::new(title)))
    }

    /// Subscriptions known from the last listing, without a network call.
    pub fn subscriptions(&self) -> Vec<Arc<Subscription>> {
        sorted(&self.subscription_snapshot())
    }

    /// Categories known from the last listing, without a network call.
    pub fn categories(&self) -> Vec<Arc<Category>> {
        sorted(&self.category_snapshot())
    }

    pub fn subscription(&self, id: &str) -> Option<Arc<Subscription>> {
        self.subscription_snapshot().get(id)
    }

    pub fn category(&self, id: &str) -> Option<Arc<Category>> {
        self.category_snapshot().get(id)
    }

    pub fn cached_item(&self, id: &str) -> Option<Arc<Item>> {
        self.item_cache.get(id)
    }

    /// Fetch one page of `feed`'s items.
    ///
    /// Without a read status, read and unread items are listed together and
    /// each is marked by a second, unread-only listing with the same paging
    /// parameters. Listing only read items is not offered by the API and
    /// fails with [`TributaryError::Unsupported`].
    pub async fn get_items(
        &self,
        feed: &Feed,
        query: ItemQuery,
    ) -> Result<ListWithContinuation<ItemWithStatus>> {
        if query.read_status == Some(ReadStatus::Read) {
            return Err(TributaryError::Unsupported("listing only read items"));
        }
        if let Some(continuation) = &query.continuation {
            continuation.ensure_issued_for(feed)?;
        }

        match query.read_status {
            Some(_) => {
                let ids = self.get_item_ids(feed, true, &query).await?;
                let items = self.get_items_from_ids(&ids.items).await?;

                let items = items
                    .into_iter()
                    .map(|item| ItemWithStatus::new(item, ReadStatus::Unread))
                    .collect();
                Ok(ListWithContinuation::new(items, ids.continuation))
            }
            None => {
                let all = self.get_item_ids(feed, false, &query).await?;
                // Both listings use the same paging parameters and are assumed
                // to stay page-aligned; the unread continuation is dropped.
                let unread = self.get_item_ids(feed, true, &query).await?;
                let unread: HashSet<&str> = unread.items.iter().map(String::as_str).collect();

                let items = self.get_items_from_ids(&all.items).await?;

                let items = items
                    .into_iter()
                    .zip(&all.items)
                    .map(|(item, id)| {
                        let status = if unread.contains(id.as_str()) {
                            ReadStatus::Unread
                        } else {
                            ReadStatus::Read
                        };
                        ItemWithStatus::new(item, status)
                    })
                    .collect();
                Ok(ListWithContinuation::new(items, all.continuation))
            }
        }
    }

    async fn get_item_ids(
        &self,
        feed: &Feed,
        unread_only: bool,
        query: &ItemQuery,
    ) -> Result<ListWithContinuation<String>> {
        let url = self.endpoints.item_ids(
            &feed.feed_address(),
            unread_only,
            query.limit,
            query.older_than,
            query.continuation.as_ref().map(Continuation::code),
        )?;
        let response: ItemRefs = self.get(&url).await?;

        let ids = response
            .item_refs
            .iter()
            .map(|item_ref| ids::ref_id(&item_ref.id).into_owned())
            .collect();
        let continuation = match response.continuation {
            Some(code) => Some(Continuation::new(code.continuation()?, feed.clone())),
            None => None,
        };

        Ok(ListWithContinuation::new(ids, continuation))
    }

    /// Resolve ids to items in the same order, fetching cache misses in one request.
    pub(crate) async fn get_items_from_ids(&self, ids: &[String]) -> Result<Vec<Arc<Item>>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut resolved: Vec<Option<Arc<Item>>> = vec![None; ids.len()];
        let mut misses: Vec<&str> = Vec::new();
        let mut slots: HashMap<&str, Vec<usize>> = HashMap::new();

        for (position, id) in ids.iter().enumerate() {
            match self.item_cache.get(id) {
                Some(item) => resolved[position] = Some(item),
                None => {
                    let positions = slots.entry(id.as_str()).or_default();
                    if positions.is_empty() {
                        misses.push(id);
                    }
                    positions.push(position);
                }
            }
        }

        debug!(
            requested = ids.len(),
            uncached = misses.len(),
            "Resolving items"
        );

        if !misses.is_empty() {
            for item in self.get_items_from_api(&misses).await? {
                let positions = slots
                    .remove(item.id.as_str())
                    .ok_or_else(|| ApiParseError::UnexpectedItem(item.id.clone()))?;
                let cached = self.item_cache.insert(item);
                for position in positions {
                    resolved[position] = Some(cached.clone());
                }
            }
        }

        resolved
            .into_iter()
            .zip(ids)
            .map(|(item, id)| {
                item.ok_or_else(|| TributaryError::from(ApiParseError::MissingItem(id.clone())))
            })
            .collect()
    }

    /// Fetch and parse the content of `ids`.
    ///
    /// An item from a subscription missing locally triggers one subscription
    /// re-sync for that stream; a miss after that is a parse failure.
    async fn get_items_from_api(&self, ids: &[&str]) -> Result<Vec<Item>> {
        let url = self
            .endpoints
            .item_contents(ids.iter().map(|id| ids::content_request_id(*id)))?;
        let response: ItemContents = self.get(&url).await?;

        let categories = self.category_snapshot();
        let mut subscriptions = self.subscription_snapshot();
        let mut resynced: HashSet<String> = HashSet::new();
        let mut items = Vec::with_capacity(response.items.len());

        for wire in response.items {
            let id = ids::item_id(&wire.id)?.to_string();
            let stream_id = ids::subscription_id(&wire.origin.stream_id)?.to_string();

            let subscription = match subscriptions.get(&stream_id) {
                Some(subscription) => subscription,
                None if !resynced.contains(&stream_id) => {
                    debug!(stream_id = %stream_id, "Unknown subscription, re-syncing");
                    self.list_subscriptions().await?;
                    subscriptions = self.subscription_snapshot();
                    resynced.insert(stream_id.clone());
                    subscriptions
                        .get(&stream_id)
                        .ok_or(ApiParseError::UnknownSubscription(stream_id))?
                }
                None => return Err(ApiParseError::UnknownSubscription(stream_id).into()),
            };

            items.push(item_from_wire(id, wire, &categories, subscription)?);
        }

        Ok(items)
    }

    async fn get<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        debug!(url = %url, "GET");
        let body = self.transport.get_json(url).await?;
        Ok(serde_json::from_str(&body).map_err(ApiParseError::from)?)
    }

    fn subscription_snapshot(&self) -> Arc<FeedIndex<Subscription>> {
        self.subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn category_snapshot(&self) -> Arc<FeedIndex<Category>> {
        self.categories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Swap in a new snapshot built from `entries`.
fn replace<T>(
    slot: &RwLock<Arc<FeedIndex<T>>>,
    entries: Vec<(String, Arc<T>)>,
) -> Arc<FeedIndex<T>> {
    let mut current = slot.write().unwrap_or_else(PoisonError::into_inner);
    let next = Arc::new(FeedIndex::next(&current, entries));
    *current = next.clone();
    next
}

fn sorted<T: Ord>(index: &FeedIndex<T>) -> Vec<Arc<T>> {
    let mut values: Vec<Arc<T>> = index.values().cloned().collect();
    values.sort();
    values
}

fn subscription_from_wire(
    wire: WireSubscription,
    known_categories: &FeedIndex<Category>,
) -> std::result::Result<Subscription, ApiParseError> {
    let id = ids::subscription_id(&wire.id)?.to_string();

    let mut categories = BTreeSet::new();
    for tag in wire.categories {
        let category = match known_categories.get(&tag.id) {
            Some(known) => known,
            None => {
                let label = ids::category_label(&tag.id)?.to_string();
                Arc::new(Category::new(tag.id, label))
            }
        };
        categories.insert(category);
    }

    let mut subscription = Subscription::new(id, wire.title);
    subscription.url = wire.url;
    subscription.html_url = wire.html_url;
    subscription.icon_url = wire.icon_url;
    subscription.categories = categories;
    Ok(subscription)
}

fn item_from_wire(
    id: String,
    wire: WireItem,
    categories: &FeedIndex<Category>,
    subscription: Arc<Subscription>,
) -> std::result::Result<Item, ApiParseError> {
    let canonical_link = first_link(&wire.canonical, &id, "canonical")?;
    let alternate_link = first_link(&wire.alternate, &id, "alternate")?;

    let published = ids::millis("published", &wire.published)?;
    let updated = ids::millis("updated", &wire.updated)?;
    let crawled = ids::millis("crawlTimeMsec", &wire.crawl_time_msec)?;

    let item_categories = wire
        .categories
        .into_iter()
        .filter(|tag| ids::is_label(tag))
        .map(|tag| {
            categories
                .get(&tag)
                .ok_or(ApiParseError::UnknownCategory(tag))
        })
        .collect::<std::result::Result<BTreeSet<_>, _>>()?;

    Ok(Item {
        id,
        title: html_escape::decode_html_entities(&wire.title).into_owned(),
        canonical_link,
        alternate_link,
        published,
        updated,
        crawled,
        summary: wire.summary.content,
        author: html_escape::decode_html_entities(&wire.author).into_owned(),
        categories: item_categories,
        subscription,
    })
}

fn first_link(
    links: &[wire::WireLink],
    id: &str,
    field: &'static str,
) -> std::result::Result<String, ApiParseError> {
    links
        .first()
        .map(|link| link.href.clone())
        .ok_or_else(|| ApiParseError::MissingLink {
            id: id.to_string(),
            field,
        })
}
