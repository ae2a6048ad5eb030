use chrono::{DateTime, Utc};

use crate::app::{AppContext, Result, TributaryError};
use crate::cli::FeedSelector;
use crate::domain::{Category, Feed, ItemQuery, ItemWithStatus, ReadStatus};

const READING_LIST_TITLE: &str = "All items";

pub async fn list_subscriptions(ctx: &AppContext) -> Result<()> {
    let (_, subscriptions) = ctx.engine.sync_feeds().await?;

    if subscriptions.is_empty() {
        println!("No subscriptions");
        return Ok(());
    }

    for subscription in subscriptions {
        let labels: Vec<&str> = subscription.categories.iter().map(|c| c.label()).collect();
        if labels.is_empty() {
            println!("{} [{}]", subscription.title, subscription.id);
        } else {
            println!(
                "{} [{}] ({})",
                subscription.title,
                subscription.id,
                labels.join(", ")
            );
        }
    }

    Ok(())
}

pub async fn list_categories(ctx: &AppContext) -> Result<()> {
    let categories = ctx.engine.list_categories().await?;

    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }

    for category in categories {
        println!("{} [{}]", category.label(), category.id());
    }

    Ok(())
}

pub struct ItemsArgs {
    pub feed: FeedSelector,
    pub unread: bool,
    pub limit: Option<u32>,
    pub older_than: Option<DateTime<Utc>>,
    pub pages: usize,
    pub json: bool,
}

pub async fn list_items(ctx: &AppContext, args: ItemsArgs) -> Result<()> {
    ctx.engine.sync_feeds().await?;
    let feed = resolve_feed(ctx, &args.feed)?;

    let mut query = ItemQuery::new().limit(args.limit.unwrap_or(ctx.config.items.page_size));
    if args.unread {
        query = query.unread_only();
    }
    if let Some(older_than) = args.older_than {
        query = query.older_than(older_than);
    }

    if !args.json {
        println!("{} - {}", ctx.service.display_title(), feed.title());
    }

    let mut next = Some(query);
    let mut pages = 0;
    let mut shown = 0;
    while let Some(query) = next.take() {
        if pages == args.pages {
            break;
        }
        let page = ctx.engine.get_items(&feed, query.clone()).await?;
        pages += 1;
        shown += page.len();

        for item in &page.items {
            if args.json {
                println!("{}", serde_json::to_string(item)?);
            } else {
                println!("{}", format_item(item));
            }
        }

        next = query.next_page(&page);
    }

    if shown == 0 && !args.json {
        println!("No items");
    }

    Ok(())
}

fn resolve_feed(ctx: &AppContext, selector: &FeedSelector) -> Result<Feed> {
    match selector {
        FeedSelector::ReadingList => Ok(ctx
            .engine
            .current_reading_list()
            .unwrap_or_else(|| ctx.engine.reading_list(READING_LIST_TITLE))),
        FeedSelector::Category(label) => ctx
            .engine
            .category(Category::from_label(label).id())
            .map(Feed::from)
            .ok_or_else(|| TributaryError::FeedNotFound(label.clone())),
        FeedSelector::Subscription(id) => ctx
            .engine
            .subscription(id)
            .map(Feed::from)
            .ok_or_else(|| TributaryError::FeedNotFound(id.clone())),
    }
}

fn format_item(item: &ItemWithStatus) -> String {
    let marker = match item.read_status {
        ReadStatus::Unread => "*",
        ReadStatus::Read => " ",
    };
    format!(
        "{} {} | {} | {} | {}",
        marker,
        item.published.format("%Y-%m-%d %H:%M"),
        item.subscription.title,
        item.display_title(),
        item.link()
    )
}
