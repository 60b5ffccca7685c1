/// Process-wide settings shared by the aggregator and every source.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    /// Article-index service used for Paragraph discovery.
    pub firefly_api: String,
    /// Identity graph used to resolve an address from a domain and back.
    pub profile_api: String,
    /// Feed discovery endpoint that turns a site origin into its feed URL.
    pub feed_discovery_api: String,
    pub mirror_base_url: String,
    pub paragraph_base_url: String,
    /// Feed host serving `/blogs/rss/@{username}` documents.
    pub paragraph_feed_api: String,
    /// How many index records to request when discovering a username.
    pub index_fetch_limit: usize,
    pub default_limit: usize,
    pub max_limit: usize,
    /// Character cap applied to sanitized titles and descriptions.
    pub description_max_chars: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            user_agent: "Article-Aggregator/1.0".to_string(),
            timeout_seconds: 30,
            firefly_api: "https://api.firefly.land".to_string(),
            profile_api: "https://api.web3.bio".to_string(),
            feed_discovery_api: "https://public-api.wordpress.com".to_string(),
            mirror_base_url: "https://mirror.xyz".to_string(),
            paragraph_base_url: "https://paragraph.com".to_string(),
            paragraph_feed_api: "https://api.paragraph.com".to_string(),
            index_fetch_limit: 20,
            default_limit: 10,
            max_limit: 10,
            description_max_chars: 140,
        }
    }
}
