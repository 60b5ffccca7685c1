//! Paragraph source. The platform has no per-address feed, so resolution is
//! two-phase: article-index records for the address reveal the author's
//! username, then the username's feed supersedes whatever the index carried.

use crate::config::AggregatorConfig;
use crate::fetcher::Fetcher;
use crate::firefly::{FireflyArticleRecord, FireflyClient, INDEX_PLATFORM_PARAGRAPH};
use crate::parser::FeedParser;
use crate::sanitize::sanitize;
use crate::traits::{ArticleSource, SourceOutput};
use crate::types::{ArticleItem, Platform, Result, SiteInfo};
use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use serde::Deserialize;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

static PARAGRAPH_PROFILE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"paragraph\.(?:com|xyz)/@([a-zA-Z0-9_.-]+)").unwrap());
/// Host part of a loosely-formed URL: scheme, userinfo and `www.` stripped.
static HOST_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:https?://)?(?:[^@/\n]+@)?(?:www\.)?([^:/\n]+)").unwrap());

/// Paragraph-shaped embedded body of an index record. Fields arrive
/// missing or null interchangeably, so everything is optional.
#[derive(Debug, Default, Deserialize)]
struct ParagraphContent {
    title: Option<String>,
    markdown: Option<String>,
    slug: Option<String>,
    url: Option<String>,
}

/// Pull a username out of an index record's URL. Profile-style URLs carry
/// it after `@`; custom domains fall back to the bare host name.
pub fn extract_username(record_url: &str) -> Option<String> {
    if record_url.contains('@') {
        PARAGRAPH_PROFILE_URL
            .captures(record_url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    } else {
        HOST_NAME
            .captures(record_url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Reduce index records to the discovered username plus fallback items.
/// Only Paragraph-shaped records participate; a record whose embedded JSON
/// does not decode is skipped on its own, and the first non-empty username
/// wins with later records never overriding it.
pub fn normalize_index_records(
    records: Vec<FireflyArticleRecord>,
    address: &str,
    config: &AggregatorConfig,
    now_ms: i64,
) -> (String, Vec<ArticleItem>) {
    let cap = config.description_max_chars;
    let mut username = String::new();
    let mut items = Vec::new();

    for record in records {
        if record.platform != INDEX_PLATFORM_PARAGRAPH {
            continue;
        }
        let content: ParagraphContent = match serde_json::from_str(&record.content_body) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Skipping unreadable index record {}: {}",
                    record.original_id, e
                );
                continue;
            }
        };

        let url = content.url.unwrap_or_default();
        let markdown = content.markdown.unwrap_or_default();

        if username.is_empty() && !url.is_empty() {
            if let Some(found) = extract_username(&url) {
                if !found.is_empty() {
                    username = found;
                }
            }
        }

        let published = if record.content_timestamp > 0 {
            record.content_timestamp.checked_mul(1000).unwrap_or(now_ms)
        } else {
            now_ms
        };
        let link = if url.is_empty() {
            let owner = if username.is_empty() {
                address
            } else {
                username.as_str()
            };
            format!(
                "{}/@{}/{}",
                config.paragraph_base_url,
                owner,
                content.slug.unwrap_or_default()
            )
        } else {
            format!("https://{url}")
        };

        items.push(ArticleItem {
            title: content.title.unwrap_or_default(),
            link,
            description: sanitize(Some(&markdown), Some(cap)),
            published,
            body: markdown,
            platform: Platform::Paragraph,
        });
    }

    (username, items)
}

pub struct ParagraphSource {
    fetcher: Arc<Fetcher>,
    config: Arc<AggregatorConfig>,
    address: String,
}

impl ParagraphSource {
    pub fn new(fetcher: Arc<Fetcher>, config: Arc<AggregatorConfig>, address: String) -> Self {
        Self {
            fetcher,
            config,
            address,
        }
    }

    async fn discover(&self) -> Result<(String, Vec<ArticleItem>)> {
        let client = FireflyClient::new(self.fetcher.clone(), &self.config);
        let records = client
            .fetch_articles(&self.address, self.config.index_fetch_limit)
            .await?;
        Ok(normalize_index_records(
            records,
            &self.address,
            &self.config,
            Utc::now().timestamp_millis(),
        ))
    }
}

#[async_trait]
impl ArticleSource for ParagraphSource {
    fn platform(&self) -> Platform {
        Platform::Paragraph
    }

    async fn resolve(&self) -> Result<Option<SourceOutput>> {
        if self.address.is_empty() {
            return Ok(None);
        }

        let (username, index_items) = self.discover().await?;
        if username.is_empty() {
            debug!("No Paragraph username discovered for {}", self.address);
            return Ok(None);
        }

        let profile_url = format!("{}/@{}", self.config.paragraph_base_url, username);
        let feed_url = format!("{}/blogs/rss/@{}", self.config.paragraph_feed_api, username);
        let parser = FeedParser::new(self.fetcher.clone());

        let Some(feed) = parser.parse(&feed_url).await else {
            // The index already yielded items; ship them under a
            // synthesized site instead of dropping the platform.
            debug!(
                "Paragraph feed unavailable for @{}, keeping index items",
                username
            );
            return Ok(Some(SourceOutput {
                site: SiteInfo {
                    platform: Platform::Paragraph,
                    name: format!("{username}'s Paragraph"),
                    description: String::new(),
                    image: String::new(),
                    link: profile_url,
                },
                items: index_items,
            }));
        };

        let cap = self.config.description_max_chars;
        let name = sanitize(Some(&feed.title), Some(cap));
        let site = SiteInfo {
            platform: Platform::Paragraph,
            name: if name.is_empty() {
                format!("{username}'s Paragraph")
            } else {
                name
            },
            description: clean_undefined(sanitize(Some(&feed.description), Some(cap))),
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
                    description: clean_undefined(sanitize(Some(&item.description), Some(cap))),
                    published: item.published,
                    body,
                    platform: Platform::Paragraph,
                }
            })
            .collect();

        Ok(Some(SourceOutput { site, items }))
    }
}

/// Feed metadata occasionally carries the literal string "undefined";
/// treat it as absent.
fn clean_undefined(value: String) -> String {
    if value == "undefined" {
        String::new()
    } else {
        value
    }
}
