//! Client for the Firefly article index, which tracks on-chain publishing
//! activity per wallet address across Mirror and Paragraph.

use crate::config::AggregatorConfig;
use crate::fetcher::Fetcher;
use crate::types::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Discriminator for Paragraph-shaped index records. The index also
/// carries Mirror-shaped rows (platform 1), which the feed-based Mirror
/// source never consumes.
pub const INDEX_PLATFORM_PARAGRAPH: u8 = 2;

#[derive(Debug, Serialize)]
struct ArticleIndexRequest<'a> {
    addresses: Vec<&'a str>,
    limit: usize,
}

/// One row from the article index. `content_body` is embedded JSON whose
/// schema depends on `platform`, so it stays a string here and each source
/// decodes its own shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FireflyArticleRecord {
    #[serde(default)]
    pub platform: u8,
    #[serde(default)]
    pub original_id: String,
    /// Publication time in epoch seconds; zero when the index has none.
    #[serde(default)]
    pub content_timestamp: i64,
    #[serde(default)]
    pub content_body: String,
}

#[derive(Debug, Default, Deserialize)]
struct ArticleIndexResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

pub struct FireflyClient {
    fetcher: Arc<Fetcher>,
    base_url: String,
}

impl FireflyClient {
    pub fn new(fetcher: Arc<Fetcher>, config: &AggregatorConfig) -> Self {
        Self {
            fetcher,
            base_url: config.firefly_api.clone(),
        }
    }

    /// Fetch index records for one address. Records that fail to decode are
    /// skipped individually; the rest of the batch still comes back.
    pub async fn fetch_articles(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<FireflyArticleRecord>> {
        let url = format!("{}/article/v1/article", self.base_url);
        let request = ArticleIndexRequest {
            addresses: vec![address],
            limit,
        };
        let response: ArticleIndexResponse = self.fetcher.post_json(&url, &request).await?;

        let mut records = Vec::new();
        for value in response.data {
            match serde_json::from_value::<FireflyArticleRecord>(value) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping malformed article index record: {}", e),
            }
        }
        debug!(
            "Article index returned {} records for {}",
            records.len(),
            address
        );
        Ok(records)
    }
}
