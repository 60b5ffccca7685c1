//! End-to-end scenarios against the live upstream services. These depend on
//! real accounts continuing to publish, so they are ignored by default:
//!
//!     cargo test --test live_scenarios_test -- --ignored

use article_aggregator::profile::ProfileClient;
use article_aggregator::{
    AggregatorConfig, ArticleAggregator, ArticleItem, ArticleQuery, Fetcher, Platform,
};
use std::sync::{Arc, Once};
use tracing::info;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init()
            .ok();
    });
}

fn assert_sorted_newest_first(items: &[ArticleItem]) {
    for pair in items.windows(2) {
        assert!(
            pair[0].published >= pair[1].published,
            "items out of order: {} ({}) before {} ({})",
            pair[0].title,
            pair[0].published,
            pair[1].title,
            pair[1].published
        );
    }
}

#[tokio::test]
#[ignore]
async fn test_paragraph_author_via_article_index() {
    init_tracing();

    info!("Aggregating for a Paragraph-only author");

    let aggregator = ArticleAggregator::new(AggregatorConfig::default());
    let query = ArticleQuery {
        address: Some("0xf1268b5eae72617ddb2cfcaa82d379155b675dfd".to_string()),
        limit: Some(10),
        ..Default::default()
    };
    let response = aggregator.aggregate(&query).await;

    assert!(response.error.is_none());
    assert!(!response.items.is_empty());
    assert!(response.items.len() <= 10);
    assert_sorted_newest_first(&response.items);

    assert_eq!(response.sites[0].platform, Platform::Paragraph);
    assert_eq!(
        response.sites[0].link,
        "https://paragraph.com/@pioneering-spirit"
    );

    info!(
        "Got {} items from {} sites",
        response.items.len(),
        response.sites.len()
    );
}

#[tokio::test]
#[ignore]
async fn test_paragraph_username_with_domain_suffix() {
    init_tracing();

    let aggregator = ArticleAggregator::new(AggregatorConfig::default());
    let query = ArticleQuery {
        address: Some("0x742b97dc68bcc3475feb734c2df2c76f25664532".to_string()),
        ..Default::default()
    };
    let response = aggregator.aggregate(&query).await;

    assert!(response.error.is_none());
    assert!(!response.items.is_empty());
    assert_sorted_newest_first(&response.items);

    let paragraph_site = response
        .sites
        .iter()
        .find(|s| s.platform == Platform::Paragraph)
        .expect("expected a paragraph site");
    assert!(paragraph_site.link.ends_with("@jamesbeck.eth"));
}

#[tokio::test]
#[ignore]
async fn test_paragraph_username_from_plain_handle() {
    init_tracing();

    let aggregator = ArticleAggregator::new(AggregatorConfig::default());
    let query = ArticleQuery {
        address: Some("0xc9ddb5e37165827bbbff15b582e232c06862c4e8".to_string()),
        ..Default::default()
    };
    let response = aggregator.aggregate(&query).await;

    assert!(response.error.is_none());
    assert!(!response.items.is_empty());
    assert_sorted_newest_first(&response.items);

    let paragraph_site = response
        .sites
        .iter()
        .find(|s| s.platform == Platform::Paragraph)
        .expect("expected a paragraph site");
    assert!(paragraph_site.link.ends_with("@blog"));
}

#[tokio::test]
#[ignore]
async fn test_contenthash_website_leads_the_site_list() {
    init_tracing();

    info!("Aggregating vitalik.eth with its contenthash website");

    let aggregator = ArticleAggregator::new(AggregatorConfig::default());
    let query = ArticleQuery {
        address: Some("0xd8da6bf26964af9d7eed9e03e53415d37aa96045".to_string()),
        domain: Some("vitalik.eth".to_string()),
        contenthash: Some("ipfs://QmcZtyhGn4nvsTD9mdMvLpNQyvoBHVhFCvWMMK9RnCAw9v".to_string()),
        limit: Some(10),
        ..Default::default()
    };
    let response = aggregator.aggregate(&query).await;

    assert!(response.error.is_none());
    assert!(!response.items.is_empty());
    assert!(response.items.len() <= 10);
    assert_sorted_newest_first(&response.items);

    // Sources merge in registration order, so the website entry comes first.
    assert_eq!(response.sites[0].platform, Platform::Website);
    assert!(response
        .items
        .iter()
        .any(|i| i.platform == Platform::Website));
}

#[tokio::test]
#[ignore]
async fn test_domain_resolution_reaches_mirror_and_paragraph() {
    init_tracing();

    info!("Resolving bradgao.eth to an address, then aggregating");

    let config = AggregatorConfig::default();
    let fetcher = Arc::new(Fetcher::new(&config));
    let profiles = ProfileClient::new(fetcher, &config);
    let (address, domain) = profiles.resolve("", "bradgao.eth").await;
    assert!(!address.is_empty(), "profile lookup returned no address");

    let aggregator = ArticleAggregator::new(config);
    let query = ArticleQuery {
        address: Some(address),
        domain: Some(domain),
        ..Default::default()
    };
    let response = aggregator.aggregate(&query).await;

    assert!(response.error.is_none());
    assert!(!response.items.is_empty());
    assert_sorted_newest_first(&response.items);

    let platforms: Vec<Platform> = response.sites.iter().map(|s| s.platform).collect();
    assert!(platforms.contains(&Platform::Mirror));
    assert!(platforms.contains(&Platform::Paragraph));
}
