use crate::config::AggregatorConfig;
use crate::fetcher::Fetcher;
use crate::identity::{is_valid_ethereum_address, is_valid_solana_address};
use crate::profile::ProfileClient;
use crate::sources::{MirrorSource, ParagraphSource, WebsiteSource};
use crate::traits::{ArticleSource, SourceOutput};
use crate::types::{ArticleItem, ArticleQuery, ArticleResponse, SiteInfo};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Top-level orchestrator: validates the query, resolves the identity,
/// fans the eligible sources out concurrently and merges whatever they
/// produce into one bounded response.
pub struct ArticleAggregator {
    config: Arc<AggregatorConfig>,
    fetcher: Arc<Fetcher>,
}

impl ArticleAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        let fetcher = Arc::new(Fetcher::new(&config));
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    /// Run one aggregation end to end. This never fails: upstream problems
    /// shrink the response, they do not error it.
    pub async fn aggregate(&self, query: &ArticleQuery) -> ArticleResponse {
        let address = query
            .address
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        let domain = query.domain.as_deref().unwrap_or_default().trim().to_string();
        let has_contenthash = query
            .contenthash
            .as_deref()
            .map(|s| !s.is_empty())
            .unwrap_or(false);
        let limit = query
            .limit
            .unwrap_or(self.config.default_limit)
            .clamp(1, self.config.max_limit);

        let address_ok = is_valid_ethereum_address(&address) || is_valid_solana_address(&address);
        if !address_ok && !(has_contenthash && !domain.is_empty()) {
            // Nothing viable to aggregate for. Inputs that were supplied but
            // rejected get flagged; a blank query is just an empty result.
            debug!("No viable identifier in query, answering empty");
            let error = if address.is_empty() && domain.is_empty() && !has_contenthash {
                None
            } else {
                Some("Invalid Param".to_string())
            };
            return ArticleResponse {
                sites: Vec::new(),
                items: Vec::new(),
                error,
            };
        }

        let profile = ProfileClient::new(self.fetcher.clone(), &self.config);
        let (resolved_address, resolved_domain) = profile.resolve(&address, &domain).await;

        let mut sources: Vec<Box<dyn ArticleSource>> = Vec::new();
        if has_contenthash && !resolved_domain.is_empty() {
            sources.push(Box::new(WebsiteSource::new(
                self.fetcher.clone(),
                self.config.clone(),
                resolved_domain.clone(),
                limit,
            )));
        }
        if is_valid_ethereum_address(&resolved_address) {
            let mirror_handle = if resolved_domain.is_empty() {
                resolved_address.clone()
            } else {
                resolved_domain.clone()
            };
            sources.push(Box::new(MirrorSource::new(
                self.fetcher.clone(),
                self.config.clone(),
                mirror_handle,
            )));
            sources.push(Box::new(ParagraphSource::new(
                self.fetcher.clone(),
                self.config.clone(),
                resolved_address.clone(),
            )));
        }

        if sources.is_empty() {
            debug!(
                "No eligible sources for address={} domain={}",
                resolved_address, resolved_domain
            );
            return ArticleResponse::default();
        }

        let outputs = collect_sources(sources).await;
        let (sites, items) = merge_outputs(outputs, limit);
        info!(
            "Aggregated {} items across {} sites for address={} domain={}",
            items.len(),
            sites.len(),
            resolved_address,
            resolved_domain
        );
        ArticleResponse {
            sites,
            items,
            error: None,
        }
    }
}

/// Run every source on its own task and wait for all of them to settle.
/// A source that fails, panics or comes back empty is logged and dropped;
/// it cannot disturb its siblings.
pub async fn collect_sources(sources: Vec<Box<dyn ArticleSource>>) -> Vec<SourceOutput> {
    let handles: Vec<_> = sources
        .into_iter()
        .map(|source| {
            tokio::spawn(async move {
                let platform = source.platform();
                (platform, source.resolve().await)
            })
        })
        .collect();

    let mut outputs = Vec::new();
    for joined in join_all(handles).await {
        match joined {
            Ok((platform, Ok(Some(output)))) => {
                debug!("{} contributed {} items", platform, output.items.len());
                outputs.push(output);
            }
            Ok((platform, Ok(None))) => {
                debug!("{} had nothing for this identity", platform);
            }
            Ok((platform, Err(e))) => {
                warn!("{} source failed: {}", platform, e);
            }
            Err(e) => {
                warn!("Source task panicked: {}", e);
            }
        }
    }
    outputs
}

/// Merge per-source outputs: sources without items contribute nothing (not
/// even their site), items sort newest-first with ties keeping source
/// order, the merged list is cut to `limit`, and sites whose items all
/// fell past the cut are pruned.
pub fn merge_outputs(
    outputs: Vec<SourceOutput>,
    limit: usize,
) -> (Vec<SiteInfo>, Vec<ArticleItem>) {
    let mut sites = Vec::new();
    let mut items: Vec<ArticleItem> = Vec::new();

    for output in outputs {
        if output.items.is_empty() {
            continue;
        }
        sites.push(output.site);
        items.extend(output.items);
    }

    items.sort_by(|a, b| b.published.cmp(&a.published));
    items.truncate(limit);
    sites.retain(|site| items.iter().any(|item| item.platform == site.platform));

    (sites, items)
}
