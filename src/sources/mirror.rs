//! Mirror source: every profile has a deterministic Atom feed at
//! `https://mirror.xyz/{handle}/feed/atom`, so resolution is one fetch.

use crate::config::AggregatorConfig;
use crate::fetcher::Fetcher;
use crate::identity::{format_text, is_valid_ethereum_address};
use crate::parser::FeedParser;
use crate::sanitize::sanitize;
use crate::traits::{ArticleSource, SourceOutput};
use crate::types::{ArticleItem, Platform, Result, SiteInfo};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Handle as shown in the synthesized site name: raw addresses are
/// display-shortened, domain handles stay verbatim.
pub fn display_handle(handle: &str) -> String {
    if is_valid_ethereum_address(handle) {
        format_text(handle, None)
    } else {
        handle.to_string()
    }
}

pub struct MirrorSource {
    fetcher: Arc<Fetcher>,
    config: Arc<AggregatorConfig>,
    /// Resolved domain when the identity has one, else the raw address.
    handle: String,
}

impl MirrorSource {
    pub fn new(fetcher: Arc<Fetcher>, config: Arc<AggregatorConfig>, handle: String) -> Self {
        Self {
            fetcher,
            config,
            handle,
        }
    }
}

#[async_trait]
impl ArticleSource for MirrorSource {
    fn platform(&self) -> Platform {
        Platform::Mirror
    }

    async fn resolve(&self) -> Result<Option<SourceOutput>> {
        if self.handle.is_empty() {
            return Ok(None);
        }

        let feed_url = format!("{}/{}/feed/atom", self.config.mirror_base_url, self.handle);
        let parser = FeedParser::new(self.fetcher.clone());
        let Some(feed) = parser.parse(&feed_url).await else {
            debug!("No Mirror feed for {}", self.handle);
            return Ok(None);
        };

        let cap = self.config.description_max_chars;
        let profile_url = format!("{}/{}", self.config.mirror_base_url, self.handle);

        let name = sanitize(Some(&feed.title), Some(cap));
        let site = SiteInfo {
            platform: Platform::Mirror,
            name: if name.is_empty() {
                format!("{}'s Mirror", display_handle(&self.handle))
            } else {
                name
            },
            description: sanitize(Some(&feed.description), Some(cap)),
            image: feed.image,
            link: if feed.link.is_empty() {
                profile_url
            } else {
                feed.link
            },
        };

        let items = feed
            .items
            .into_iter()
            .map(|item| {
                let body = item
                    .content
                    .clone()
                    .unwrap_or_else(|| item.description.clone());
                ArticleItem {
                    title: sanitize(Some(&item.title), Some(cap)),
                    link: item.link,
                    description: sanitize(Some(&item.description), Some(cap)),
                    published: item.published,
                    body,
                    platform: Platform::Mirror,
                }
            })
            .collect();

        Ok(Some(SourceOutput { site, items }))
    }
}
