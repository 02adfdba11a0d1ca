//! Transport-failure behavior of the classification clients
//!
//! Every client is pointed at an unroutable address; the calls must
//! come back with the designated fallback value and a warning log,
//! never an error.

use clamor_classifiers::prelude::*;
use clamor_core::{Category, GeoStatus, Sentiment, SpamVerdict};
use tracing_test::traced_test;

// Nothing listens on port 1; connections are refused immediately.
const DEAD_URL: &str = "http://127.0.0.1:1";

#[tokio::test]
#[traced_test]
async fn sentiment_transport_failure_falls_back_to_unknown() {
    let client = ApiLayerSentiment::new("test-key", DEAD_URL).unwrap();
    let result = client.analyze("the delivery was late again").await.unwrap();
    assert_eq!(result.sentiment, Sentiment::Unknown);
    assert!(logs_contain("HTTP error while fetching sentiment"));
}

#[tokio::test]
#[traced_test]
async fn openai_category_transport_failure_falls_back_to_other() {
    let client = OpenAiCategory::new("test-key", DEAD_URL).unwrap();
    let result = client.classify("I was double charged").await.unwrap();
    assert_eq!(result.category, Category::Other);
    assert!(logs_contain("HTTP error while fetching category"));
}

#[tokio::test]
#[traced_test]
async fn openrouter_category_transport_failure_falls_back_to_other() {
    let client = OpenRouterCategory::new("test-key", DEAD_URL, None).unwrap();
    let result = client.classify("I was double charged").await.unwrap();
    assert_eq!(result.category, Category::Other);
}

#[tokio::test]
#[traced_test]
async fn spam_transport_failure_falls_back_to_clean() {
    let apilayer = ApiLayerSpam::new("test-key", DEAD_URL).unwrap();
    assert_eq!(
        apilayer.check("BUY NOW!!!").await.unwrap(),
        SpamVerdict::clean()
    );

    let ninja = NinjaSpam::new("test-key", DEAD_URL).unwrap();
    assert_eq!(ninja.check("BUY NOW!!!").await.unwrap(), SpamVerdict::clean());
    assert!(logs_contain("HTTP error while checking spam"));
}

#[tokio::test]
#[traced_test]
async fn geo_transport_failure_falls_back_to_fail() {
    let geo = IpApiGeo::new(DEAD_URL).unwrap();
    let result = geo.locate("93.184.216.34").await.unwrap();
    assert_eq!(result.status, GeoStatus::Fail);
    assert!(result.country.is_none());
    assert!(logs_contain("HTTP error while fetching geo data"));
}

#[tokio::test]
#[traced_test]
async fn geo_local_ip_is_skipped_and_logged() {
    let geo = IpApiGeo::new(DEAD_URL).unwrap();
    let result = geo.locate("localhost").await.unwrap();
    assert_eq!(result.status, GeoStatus::Skipped);
    assert!(logs_contain("skipping geo lookup for local IP"));
}
