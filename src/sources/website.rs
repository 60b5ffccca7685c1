//! Contenthash-resolved website source: maps a naming-system domain to its
//! gateway origin, discovers the site's syndication feed and normalizes it.

use crate::config::AggregatorConfig;
use crate::fetcher::Fetcher;
use crate::identity::{is_dotbit_name, is_ens_name, is_sns_name};
use crate::parser::FeedParser;
use crate::sanitize::sanitize;
use crate::traits::{ArticleSource, SourceOutput};
use crate::types::{ArticleItem, Platform, Result, SiteInfo};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};
use url::Url;

/// Loose DNS-name shape; anything matching gets fetched as a plain website.
static DNS_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9][a-z0-9-]{0,61}[a-z0-9]")
        .unwrap()
});

#[derive(Debug, Default, Deserialize)]
struct DiscoveryResponse {
    #[serde(default)]
    feeds: Vec<DiscoveredFeed>,
}

#[derive(Debug, Deserialize)]
struct DiscoveredFeed {
    #[serde(rename = "subscribe_URL")]
    subscribe_url: Option<String>,
}

/// How much of each entry survives into a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    /// Lightweight: heavy fields (content, enclosures, categories) dropped.
    List,
    /// Everything the parser produced.
    Full,
}

/// Cleaned, serializable view of one site's feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedListing {
    pub title: String,
    pub description: String,
    pub link: String,
    pub image: String,
    pub items: Vec<FeedListingItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedListingItem {
    pub title: String,
    /// Sanitized and capped for display.
    pub description: String,
    /// The same text untouched, for callers that render it themselves.
    pub body: String,
    pub link: String,
    pub published: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enclosures: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

/// Map a naming-system domain to the gateway origin its contenthash is
/// served from. Unrecognized inputs pass through untouched.
pub fn gateway_url(query: &str) -> String {
    if is_ens_name(query) {
        return format!("{query}.limo");
    }
    if is_dotbit_name(query) {
        return format!("{query}.cc");
    }
    if is_sns_name(query) {
        return format!("{query}.build");
    }
    if DNS_NAME.is_match(query) {
        if query.starts_with("https://") || query.starts_with("http://") {
            return query.to_string();
        }
        return format!("https://{query}");
    }
    query.to_string()
}

pub struct WebsiteSource {
    fetcher: Arc<Fetcher>,
    config: Arc<AggregatorConfig>,
    domain: String,
    limit: usize,
}

impl WebsiteSource {
    pub fn new(
        fetcher: Arc<Fetcher>,
        config: Arc<AggregatorConfig>,
        domain: String,
        limit: usize,
    ) -> Self {
        Self {
            fetcher,
            config,
            domain,
            limit,
        }
    }

    /// Discover and fetch the site's feed, returning a bounded listing.
    /// `None` covers every miss: empty or malformed query, no feed
    /// advertised, unparseable document, zero entries.
    pub async fn fetch_listing(&self, mode: FeedMode) -> Result<Option<FeedListing>> {
        if self.domain.is_empty() {
            return Ok(None);
        }
        // A query that claims to carry a scheme must be a real URL unless
        // it is a naming-system domain that happens to contain the text.
        if self.domain.contains("https")
            && Url::parse(&self.domain).is_err()
            && !is_ens_name(&self.domain)
            && !is_dotbit_name(&self.domain)
        {
            debug!("Rejecting malformed website query: {}", self.domain);
            return Ok(None);
        }

        let origin = gateway_url(&self.domain);
        let discovery_url = format!(
            "{}/rest/v1.1/read/feed/?url={}",
            self.config.feed_discovery_api, origin
        );
        let discovery: DiscoveryResponse = match self.fetcher.get_json(&discovery_url).await {
            Ok(discovery) => discovery,
            Err(e) => {
                warn!("Feed discovery failed for {}: {}", origin, e);
                return Ok(None);
            }
        };
        let Some(subscribe_url) = discovery
            .feeds
            .first()
            .and_then(|feed| feed.subscribe_url.clone())
        else {
            debug!("No feed advertised for {}", origin);
            return Ok(None);
        };

        let parser = FeedParser::new(self.fetcher.clone());
        let Some(feed) = parser.parse(&subscribe_url).await else {
            return Ok(None);
        };
        if feed.items.is_empty() {
            return Ok(None);
        }

        let cap = self.config.description_max_chars;
        let items = feed
            .items
            .into_iter()
            .take(self.limit)
            .map(|item| {
                let body = item.description.trim().to_string();
                FeedListingItem {
                    title: sanitize(Some(&item.title), Some(cap)),
                    description: sanitize(Some(&item.description), Some(cap)),
                    body,
                    link: item.link,
                    published: item.published,
                    content: match mode {
                        FeedMode::Full => item.content,
                        FeedMode::List => None,
                    },
                    enclosures: match mode {
                        FeedMode::Full => item.enclosures,
                        FeedMode::List => Vec::new(),
                    },
                    categories: match mode {
                        FeedMode::Full => item.categories,
                        FeedMode::List => Vec::new(),
                    },
                }
            })
            .collect();

        Ok(Some(FeedListing {
            title: sanitize(Some(&feed.title), Some(cap)),
            description: sanitize(Some(&feed.description), Some(cap)),
            link: feed.link,
            image: feed.image,
            items,
        }))
    }
}

#[async_trait]
impl ArticleSource for WebsiteSource {
    fn platform(&self) -> Platform {
        Platform::Website
    }

    async fn resolve(&self) -> Result<Option<SourceOutput>> {
        let Some(listing) = self.fetch_listing(FeedMode::List).await? else {
            return Ok(None);
        };

        let site = SiteInfo {
            platform: Platform::Website,
            name: listing.title,
            description: listing.description,
            image: listing.image,
            link: listing.link,
        };
        let items = listing
            .items
            .into_iter()
            .map(|item| ArticleItem {
                title: item.title,
                link: item.link,
                description: item.description,
                published: item.published,
                body: item.body,
                platform: Platform::Website,
            })
            .collect();

        Ok(Some(SourceOutput { site, items }))
    }
}
