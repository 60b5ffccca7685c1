use crate::fetcher::Fetcher;
use crate::types::{RawFeed, RawFeedItem};
use chrono::Utc;
use feed_rs::parser;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Fetches a syndication document and reduces whatever dialect comes back
/// (RSS 2.0, Atom, media extensions) to the single `RawFeed` shape the
/// sources consume.
///
/// Every failure along the way collapses to `None`; callers treat an absent
/// feed as "this source has nothing right now".
pub struct FeedParser {
    fetcher: Arc<Fetcher>,
}

impl FeedParser {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn parse(&self, url: &str) -> Option<RawFeed> {
        if !is_http_url(url) {
            debug!("Refusing to fetch non-http feed URL: {}", url);
            return None;
        }

        let content = match self.fetcher.get_text(url).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to fetch feed {}: {}", url, e);
                return None;
            }
        };

        parse_feed_str(&content)
    }
}

/// Validate that a feed URL is fetchable over HTTP(S).
pub fn is_http_url(url_str: &str) -> bool {
    if let Ok(url) = Url::parse(url_str) {
        url.scheme() == "http" || url.scheme() == "https"
    } else {
        false
    }
}

/// Parse raw XML into the unified feed shape. Split from the network path
/// so fixtures can drive it directly.
pub fn parse_feed_str(content: &str) -> Option<RawFeed> {
    let feed = match parser::parse(content.as_bytes()) {
        Ok(feed) => feed,
        Err(e) => {
            warn!("Failed to parse feed content: {}", e);
            return None;
        }
    };
    Some(map_feed(feed, Utc::now().timestamp_millis()))
}

fn map_feed(feed: feed_rs::model::Feed, fetched_at: i64) -> RawFeed {
    let title = feed.title.map(|t| t.content).unwrap_or_default();
    let description = feed.description.map(|d| d.content).unwrap_or_default();
    let link = feed
        .links
        .first()
        .map(|l| l.href.clone())
        .unwrap_or_default();
    let image = feed
        .logo
        .map(|i| i.uri)
        .or(feed.icon.map(|i| i.uri))
        .unwrap_or_default();

    let items = feed
        .entries
        .into_iter()
        .map(|entry| map_entry(entry, fetched_at))
        .collect::<Vec<_>>();

    debug!("Parsed feed with {} entries", items.len());

    RawFeed {
        title,
        description,
        link,
        image,
        items,
    }
}

fn map_entry(entry: feed_rs::model::Entry, fetched_at: i64) -> RawFeedItem {
    // Timestamps never stay empty: entries without dates take the fetch
    // time so downstream ordering always has something to compare.
    let published = entry
        .published
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(fetched_at);
    let created = entry
        .updated
        .or(entry.published)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(fetched_at);

    let mut title = entry.title.map(|t| t.content).unwrap_or_default();
    let mut description = entry.summary.map(|s| s.content).unwrap_or_default();
    let link = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .unwrap_or_default();
    let author = entry
        .authors
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_default();
    let content = entry.content.and_then(|c| c.body);
    let categories = entry
        .categories
        .into_iter()
        .map(|c| c.term)
        .collect::<Vec<_>>();

    // Media extensions: grouped title/description win over the entry's own,
    // and every attached URL flattens into the enclosure list.
    let mut enclosures = Vec::new();
    for media in entry.media {
        if let Some(media_title) = media.title {
            title = media_title.content;
        }
        if let Some(media_description) = media.description {
            description = media_description.content;
        }
        for media_content in media.content {
            if let Some(media_url) = media_content.url {
                enclosures.push(media_url.to_string());
            }
        }
        for thumbnail in media.thumbnails {
            enclosures.push(thumbnail.image.uri);
        }
    }

    RawFeedItem {
        id: entry.id,
        title,
        description,
        link,
        author,
        published,
        created,
        content,
        enclosures,
        categories,
    }
}
