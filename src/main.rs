use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tributary::app::AppContext;
use tributary::cli::commands::{self, ItemsArgs};
use tributary::cli::{Cli, Commands, FeedSelector};
use tributary::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Subscriptions => {
            commands::list_subscriptions(&ctx).await?;
        }
        Commands::Categories => {
            commands::list_categories(&ctx).await?;
        }
        Commands::Items {
            category,
            subscription,
            unread,
            limit,
            older_than,
            pages,
            json,
        } => {
            let args = ItemsArgs {
                feed: FeedSelector::from_args(category, subscription),
                unread,
                limit,
                older_than,
                pages,
                json,
            };
            if let Err(e) = commands::list_items(&ctx, args).await {
                if e.is_auth_failure() {
                    eprintln!("Not authorized: set service.auth_token in the config file");
                }
                return Err(e.into());
            }
        }
    }

    Ok(())
}
