//! Spam check clients
//!
//! Two interchangeable providers: APILayer (JSON body, `apikey`
//! header, score threshold as a query parameter) and API Ninjas
//! (form-encoded body, `X-Api-Key` header). Both normalize to a
//! `SpamVerdict`; unusable responses degrade to the clean verdict.

use async_trait::async_trait;
use clamor_core::SpamVerdict;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::capability::SpamChecker;
use crate::error::ClassifierError;

/// Default APILayer spam checker endpoint
pub const APILAYER_API_URL: &str = "https://api.apilayer.com/spamchecker";

/// Default API Ninjas spam check endpoint
pub const NINJA_API_URL: &str = "https://api.api-ninjas.com/v1/spamcheck";

/// Default score threshold passed to the APILayer checker
pub const DEFAULT_THRESHOLD: f64 = 2.0;

const APILAYER_TIMEOUT: Duration = Duration::from_secs(30);
const NINJA_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ApiLayerSpamResponse {
    #[serde(default)]
    is_spam: bool,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct NinjaSpamResponse {
    #[serde(default)]
    is_spam: bool,
    #[serde(default)]
    spam_score: f64,
}

fn parse_apilayer_verdict(body: &str) -> SpamVerdict {
    match serde_json::from_str::<ApiLayerSpamResponse>(body) {
        Ok(r) => SpamVerdict {
            is_spam: r.is_spam,
            score: r.score,
        },
        Err(e) => {
            warn!("unexpected spamcheck response format: {e}");
            SpamVerdict::clean()
        }
    }
}

fn parse_ninja_verdict(body: &str) -> SpamVerdict {
    match serde_json::from_str::<NinjaSpamResponse>(body) {
        Ok(r) => SpamVerdict {
            is_spam: r.is_spam,
            score: r.spam_score,
        },
        Err(e) => {
            warn!("unexpected spamcheck response format: {e}");
            SpamVerdict::clean()
        }
    }
}

/// Client for the APILayer Spam Check API
#[derive(Debug, Clone)]
pub struct ApiLayerSpam {
    api_key: String,
    api_url: String,
    threshold: f64,
    http: reqwest::Client,
}

impl ApiLayerSpam {
    /// Create a new client; the API key must be non-empty
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Result<Self, ClassifierError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ClassifierError::config(
                "API key for spam check must be provided",
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(APILAYER_TIMEOUT)
            .build()
            .map_err(|e| ClassifierError::config(format!("spam http client: {e}")))?;

        Ok(Self {
            api_key,
            api_url: api_url.into(),
            threshold: DEFAULT_THRESHOLD,
            http,
        })
    }

    /// Override the score threshold passed to the upstream service
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

#[async_trait]
impl SpamChecker for ApiLayerSpam {
    async fn check(&self, text: &str) -> Result<SpamVerdict, ClassifierError> {
        let response = self
            .http
            .post(&self.api_url)
            .header("apikey", &self.api_key)
            .query(&[("threshold", self.threshold)])
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!("HTTP error while checking spam: {e}");
                return Ok(SpamVerdict::clean());
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "spam service returned error status");
            return Ok(SpamVerdict::clean());
        }

        match response.text().await {
            Ok(body) => Ok(parse_apilayer_verdict(&body)),
            Err(e) => {
                warn!("failed to read spam response body: {e}");
                Ok(SpamVerdict::clean())
            }
        }
    }
}

/// Client for the API Ninjas Spam Check API
#[derive(Debug, Clone)]
pub struct NinjaSpam {
    api_key: String,
    api_url: String,
    http: reqwest::Client,
}

impl NinjaSpam {
    /// Create a new client; the API key must be non-empty
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Result<Self, ClassifierError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ClassifierError::config(
                "API key for spam check must be provided",
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(NINJA_TIMEOUT)
            .build()
            .map_err(|e| ClassifierError::config(format!("spam http client: {e}")))?;

        Ok(Self {
            api_key,
            api_url: api_url.into(),
            http,
        })
    }
}

#[async_trait]
impl SpamChecker for NinjaSpam {
    async fn check(&self, text: &str) -> Result<SpamVerdict, ClassifierError> {
        let response = self
            .http
            .post(&self.api_url)
            .header("X-Api-Key", &self.api_key)
            .form(&[("text", text)])
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!("HTTP error while checking spam: {e}");
                return Ok(SpamVerdict::clean());
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "spam service returned error status");
            return Ok(SpamVerdict::clean());
        }

        match response.text().await {
            Ok(body) => Ok(parse_ninja_verdict(&body)),
            Err(e) => {
                warn!("failed to read spam response body: {e}");
                Ok(SpamVerdict::clean())
            }
        }
    }
}
