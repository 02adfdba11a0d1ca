//! APILayer sentiment analysis client
//!
//! Sends the complaint text as a JSON POST and reads back a
//! `sentiment` field restricted to positive/negative/neutral.
//! Authentication is an `apikey` header. Anything unusable from the
//! upstream (transport failure, bad status, malformed payload, value
//! outside the enumeration) degrades to `Sentiment::Unknown`.

use async_trait::async_trait;
use clamor_core::{Sentiment, SentimentScore};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::capability::SentimentAnalyzer;
use crate::error::ClassifierError;

/// Default APILayer sentiment analysis endpoint
pub const DEFAULT_API_URL: &str = "https://api.apilayer.com/sentiment/analysis";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the APILayer Sentiment Analysis API
#[derive(Debug, Clone)]
pub struct ApiLayerSentiment {
    api_key: String,
    api_url: String,
    http: reqwest::Client,
}

impl ApiLayerSentiment {
    /// Create a new client; the API key must be non-empty
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Result<Self, ClassifierError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ClassifierError::config(
                "API key for sentiment analysis must be provided",
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClassifierError::config(format!("sentiment http client: {e}")))?;

        Ok(Self {
            api_key,
            api_url: api_url.into(),
            http,
        })
    }
}

#[async_trait]
impl SentimentAnalyzer for ApiLayerSentiment {
    async fn analyze(&self, text: &str) -> Result<SentimentScore, ClassifierError> {
        let response = self
            .http
            .post(&self.api_url)
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!("HTTP error while fetching sentiment: {e}");
                return Ok(SentimentScore::unknown());
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "sentiment service returned error status");
            return Ok(SentimentScore::unknown());
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                warn!("failed to read sentiment response body: {e}");
                return Ok(SentimentScore::unknown());
            }
        };

        Ok(SentimentScore::new(parse_sentiment(&body)))
    }
}

/// Parse a response body into a sentiment, falling back to `Unknown`
/// for malformed payloads or values outside the enumeration.
fn parse_sentiment(body: &str) -> Sentiment {
    #[derive(Deserialize)]
    struct SentimentResponse {
        sentiment: Option<String>,
    }

    let raw = match serde_json::from_str::<SentimentResponse>(body) {
        Ok(r) => r.sentiment.unwrap_or_default(),
        Err(e) => {
            warn!("malformed sentiment response: {e}");
            return Sentiment::Unknown;
        }
    };

    match raw.as_str() {
        "positive" => Sentiment::Positive,
        "negative" => Sentiment::Negative,
        "neutral" => Sentiment::Neutral,
        other => {
            warn!("unknown sentiment value received: {other}");
            Sentiment::Unknown
        }
    }
}
