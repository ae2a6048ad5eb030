pub mod commands;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tributary")]
#[command(about = "A Google Reader API sync client", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/tributary/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List subscriptions
    Subscriptions,
    /// List categories
    Categories,
    /// List items of the reading list, a category or a subscription
    Items {
        /// Category label to list instead of the reading list
        #[arg(long, conflicts_with = "subscription")]
        category: Option<String>,

        /// Subscription id to list instead of the reading list
        #[arg(long)]
        subscription: Option<String>,

        /// Only unread items
        #[arg(short, long)]
        unread: bool,

        /// Items per page (default: from config)
        #[arg(short = 'n', long)]
        limit: Option<u32>,

        /// Only items published before this RFC 3339 timestamp
        #[arg(long)]
        older_than: Option<DateTime<Utc>>,

        /// Number of pages to fetch
        #[arg(short, long, default_value_t = 1)]
        pages: usize,

        /// Print one JSON object per item
        #[arg(long)]
        json: bool,
    },
}

/// Which feed an `items` command lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSelector {
    ReadingList,
    Category(String),
    Subscription(String),
}

impl FeedSelector {
    pub fn from_args(category: Option<String>, subscription: Option<String>) -> Self {
        match (category, subscription) {
            (Some(label), _) => Self::Category(label),
            (None, Some(id)) => Self::Subscription(id),
            (None, None) => Self::ReadingList,
        }
    }
}
