pub mod feed_index;
pub mod item_cache;

pub use feed_index::FeedIndex;
pub use item_cache::ItemCache;
