pub mod aggregator;
pub mod config;
pub mod fetcher;
pub mod firefly;
pub mod identity;
pub mod parser;
pub mod profile;
pub mod sanitize;
pub mod sources;
pub mod traits;
pub mod types;

pub use aggregator::ArticleAggregator;
pub use config::AggregatorConfig;
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use sources::{MirrorSource, ParagraphSource, WebsiteSource};
pub use traits::{ArticleSource, SourceOutput};
pub use types::*;
