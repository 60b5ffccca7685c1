use crate::types::{ArticleItem, Platform, Result, SiteInfo};
use async_trait::async_trait;

/// What one platform source contributes to a merged response: the site's
/// metadata plus its normalized articles.
#[derive(Debug, Clone)]
pub struct SourceOutput {
    pub site: SiteInfo,
    pub items: Vec<ArticleItem>,
}

/// Trait for resolving articles from one publishing platform.
///
/// Sources run independently of each other. `Ok(None)` means the platform
/// has nothing for this identity, `Err` means an upstream call failed; the
/// caller drops the contribution either way and the remaining sources are
/// unaffected.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Platform this source feeds.
    fn platform(&self) -> Platform;

    /// Fetch and normalize this platform's articles.
    async fn resolve(&self) -> Result<Option<SourceOutput>>;
}
