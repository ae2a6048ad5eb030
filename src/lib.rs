//! # Tributary
//!
//! A client for Google Reader compatible feed-sync APIs (Inoreader, FreshRSS,
//! The Old Reader, ...).
//!
//! ## Architecture
//!
//! ```text
//! Feed → SyncEngine → Transport → JSON → Item cache → ItemWithStatus
//! ```
//!
//! - [`sync`]: the engine that lists feeds, pages through item ids, bulk
//!   fetches content and reconciles read status
//! - [`store`]: session item cache and feed snapshots
//! - [`fetcher`]: the authenticated HTTP transport
//!
//! ## Quick Start
//!
//! ```bash
//! # List subscriptions
//! tributary subscriptions
//!
//! # Two pages of unread items in a category
//! tributary items --category Tech --unread --pages 2
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config,
/// transport and engine.
pub mod app;

/// Command-line interface using clap.
///
/// - `subscriptions` - List subscriptions
/// - `categories` - List categories
/// - `items` - Page through the items of a feed
pub mod cli;

/// Configuration loaded from `~/.config/tributary/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Feed`](domain::Feed): reading list, category or subscription
/// - [`Item`](domain::Item): an immutable post shared through the cache
/// - [`Continuation`](domain::Continuation): pagination cursor bound to a feed
pub mod domain;

/// Authenticated HTTP requests.
///
/// - [`Transport`](fetcher::Transport): async trait the engine talks to
/// - [`HttpTransport`](fetcher::HttpTransport): reqwest-based implementation
pub mod fetcher;

/// Session state: the item cache and versioned feed snapshots.
pub mod store;

/// Retrieval, caching and read-status reconciliation.
pub mod sync;
