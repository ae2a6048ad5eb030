pub mod category;
pub mod continuation;
pub mod feed;
pub mod item;
pub mod service;
pub mod state;
pub mod subscription;

pub use category::Category;
pub use continuation::{Continuation, ItemQuery, ListWithContinuation};
pub use feed::{Feed, ReadingList};
pub use item::{Item, ItemWithStatus};
pub use service::ReaderService;
pub use state::ReadStatus;
pub use subscription::Subscription;
