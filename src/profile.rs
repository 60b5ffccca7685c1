//! Identity resolution: fill in the missing half of an `(address, domain)`
//! pair through the profile graph service.

use crate::config::AggregatorConfig;
use crate::fetcher::Fetcher;
use crate::identity::search_platform;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default, Deserialize)]
struct NsProfile {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    identity: Option<String>,
}

pub struct ProfileClient {
    fetcher: Arc<Fetcher>,
    base_url: String,
}

impl ProfileClient {
    pub fn new(fetcher: Arc<Fetcher>, config: &AggregatorConfig) -> Self {
        Self {
            fetcher,
            base_url: config.profile_api.clone(),
        }
    }

    /// Resolve the counterpart of whichever identifier is missing. When both
    /// are already present the pair passes through untouched, and any lookup
    /// failure falls back to the inputs so aggregation can still proceed.
    pub async fn resolve(&self, address: &str, domain: &str) -> (String, String) {
        if !address.is_empty() && !domain.is_empty() {
            return (address.to_string(), domain.to_string());
        }

        let platform = if domain.is_empty() {
            "ens"
        } else {
            search_platform(domain)
        };
        let handle = if domain.is_empty() { address } else { domain };
        let url = format!("{}/ns/{}/{}", self.base_url, platform, handle);

        match self.fetcher.get_json::<NsProfile>(&url).await {
            Ok(profile) => {
                let resolved_address = profile
                    .address
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| address.to_string());
                let resolved_domain = profile
                    .identity
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| domain.to_string());
                debug!(
                    "Resolved {} via {} to address={} domain={}",
                    handle, platform, resolved_address, resolved_domain
                );
                (resolved_address, resolved_domain)
            }
            Err(e) => {
                warn!("Profile resolution failed for {}: {}", handle, e);
                (address.to_string(), domain.to_string())
            }
        }
    }
}
