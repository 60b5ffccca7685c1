use article_aggregator::sources::website::{FeedMode, WebsiteSource};
use article_aggregator::{AggregatorConfig, ArticleAggregator, ArticleQuery, Fetcher};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "article-aggregator",
    version,
    about = "Aggregate publishing activity for a web3 identity",
    long_about = None
)]
struct Cli {
    /// Emit compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge articles for an identity across every platform it publishes on
    Aggregate {
        /// Ethereum (0x...) or Solana wallet address
        #[arg(long)]
        address: Option<String>,
        /// Naming-system domain tied to the identity (e.g. an ENS name)
        #[arg(long)]
        domain: Option<String>,
        /// Contenthash pointer; its presence enables the website source
        #[arg(long)]
        contenthash: Option<String>,
        /// Maximum number of merged items to return
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Fetch one site's feed listing without the cross-platform merge
    Feed {
        /// Domain or URL whose feed should be discovered
        query: String,
        /// Keep heavy fields (content, enclosures, categories)
        #[arg(long)]
        full: bool,
        /// Maximum number of entries to include
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AggregatorConfig::default();

    let json = match cli.command {
        Commands::Aggregate {
            address,
            domain,
            contenthash,
            limit,
        } => {
            let aggregator = ArticleAggregator::new(config);
            let query = ArticleQuery {
                address,
                domain,
                contenthash,
                limit,
            };
            let response = aggregator.aggregate(&query).await;
            info!(
                "Done: {} sites, {} items",
                response.sites.len(),
                response.items.len()
            );
            if cli.compact {
                serde_json::to_string(&response)?
            } else {
                serde_json::to_string_pretty(&response)?
            }
        }
        Commands::Feed { query, full, limit } => {
            let fetcher = Arc::new(Fetcher::new(&config));
            let source = WebsiteSource::new(fetcher, Arc::new(config), query, limit);
            let mode = if full { FeedMode::Full } else { FeedMode::List };
            match source.fetch_listing(mode).await? {
                Some(listing) => {
                    info!("Found feed with {} entries", listing.items.len());
                    if cli.compact {
                        serde_json::to_string(&listing)?
                    } else {
                        serde_json::to_string_pretty(&listing)?
                    }
                }
                None => {
                    anyhow::bail!("no feed found for the given query");
                }
            }
        }
    };

    println!("{json}");
    Ok(())
}
