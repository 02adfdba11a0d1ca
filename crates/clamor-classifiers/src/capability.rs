//! Capability traits for the classification clients
//!
//! The orchestrator depends only on these seams, so alternate
//! providers for any capability can be swapped in without touching
//! orchestration logic.

use async_trait::async_trait;
use clamor_core::{CategoryLabel, GeoLocation, SentimentScore, SpamVerdict};

use crate::error::ClassifierError;

/// Sentiment analysis over free-form complaint text
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Analyze the sentiment of the given text
    async fn analyze(&self, text: &str) -> Result<SentimentScore, ClassifierError>;
}

/// Spam detection over free-form complaint text
#[async_trait]
pub trait SpamChecker: Send + Sync {
    /// Check whether the given text is spam
    async fn check(&self, text: &str) -> Result<SpamVerdict, ClassifierError>;
}

/// IP-based geolocation lookup
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Resolve basic location data for the given IP address
    async fn locate(&self, ip: &str) -> Result<GeoLocation, ClassifierError>;
}

/// Complaint category classification
#[async_trait]
pub trait CategoryClassifier: Send + Sync {
    /// Classify the given text into one of the fixed categories
    async fn classify(&self, text: &str) -> Result<CategoryLabel, ClassifierError>;
}
