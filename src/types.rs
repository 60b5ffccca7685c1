use serde::{Deserialize, Serialize};
use std::fmt;

/// Publishing platform an article or site entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Website,
    Mirror,
    Paragraph,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Website => "website",
            Platform::Mirror => "mirror",
            Platform::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized article, regardless of which platform produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleItem {
    pub title: String,
    pub link: String,
    /// Plain-text summary, markup stripped and capped for display.
    pub description: String,
    /// Publication time in epoch milliseconds. Always set; items whose
    /// source carried no date get the fetch time instead.
    pub published: i64,
    /// Unprocessed long-form content as the source delivered it.
    pub body: String,
    pub platform: Platform,
}

/// Per-platform site metadata accompanying the merged items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    pub platform: Platform,
    pub name: String,
    pub description: String,
    pub image: String,
    pub link: String,
}

/// Feed document reduced to the fields the sources care about, independent
/// of the syndication dialect it arrived in.
#[derive(Debug, Clone, Default)]
pub struct RawFeed {
    pub title: String,
    pub description: String,
    pub link: String,
    pub image: String,
    pub items: Vec<RawFeedItem>,
}

/// One feed entry before platform-specific normalization.
#[derive(Debug, Clone, Default)]
pub struct RawFeedItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub author: String,
    /// Epoch milliseconds; the fetch time when the entry had no date.
    pub published: i64,
    /// Last-touched time: update date, else publication date, else fetch time.
    pub created: i64,
    pub content: Option<String>,
    pub enclosures: Vec<String>,
    pub categories: Vec<String>,
}

/// Inbound aggregation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleQuery {
    pub address: Option<String>,
    pub domain: Option<String>,
    pub contenthash: Option<String>,
    pub limit: Option<usize>,
}

/// Merged aggregation result. Aggregation never fails outright: requests
/// with no usable identifier still produce an (empty) response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub sites: Vec<SiteInfo>,
    pub items: Vec<ArticleItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Upstream returned HTTP {status} for {url}")]
    Upstream { url: String, status: u16 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
