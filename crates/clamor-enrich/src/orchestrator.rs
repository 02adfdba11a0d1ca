//! Enrichment orchestrator

use clamor_classifiers::capability::{
    CategoryClassifier, GeoLocator, SentimentAnalyzer, SpamChecker,
};
use clamor_core::{Category, Complaint, NewComplaint, SentimentScore, SpamVerdict};
use clamor_store::{ComplaintStore, StoreResult};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Sequences classifier calls and persistence for one complaint
///
/// The sentiment analyzer and the store are mandatory. The category
/// classifier is an explicit optional dependency: when it is absent
/// (no credential configured) the workflow runs without the category
/// step. Spam and geolocation are available capabilities that the
/// default workflow leaves disabled; wiring them in activates a
/// log-only probe between sentiment and persistence.
pub struct Orchestrator {
    sentiment: Arc<dyn SentimentAnalyzer>,
    store: Arc<dyn ComplaintStore>,
    category: Option<Arc<dyn CategoryClassifier>>,
    spam: Option<Arc<dyn SpamChecker>>,
    geo: Option<Arc<dyn GeoLocator>>,
}

impl Orchestrator {
    /// Create an orchestrator with the mandatory collaborators
    pub fn new(sentiment: Arc<dyn SentimentAnalyzer>, store: Arc<dyn ComplaintStore>) -> Self {
        Self {
            sentiment,
            store,
            category: None,
            spam: None,
            geo: None,
        }
    }

    /// Attach the optional category classifier
    pub fn with_category(mut self, category: Arc<dyn CategoryClassifier>) -> Self {
        self.category = Some(category);
        self
    }

    /// Attach the optional spam checker
    pub fn with_spam(mut self, spam: Arc<dyn SpamChecker>) -> Self {
        self.spam = Some(spam);
        self
    }

    /// Attach the optional geolocator
    pub fn with_geo(mut self, geo: Arc<dyn GeoLocator>) -> Self {
        self.geo = Some(geo);
        self
    }

    /// Whether the category step will run
    pub fn category_enabled(&self) -> bool {
        self.category.is_some()
    }

    /// Run the complaint-creation workflow
    ///
    /// Order is fixed: sentiment, optional spam/geo probes, store
    /// create, optional category update. Every step except the store
    /// create tolerates failure independently.
    pub async fn create_complaint(&self, text: &str, client_ip: &str) -> StoreResult<Complaint> {
        info!("starting complaint creation");

        // Step 1: sentiment, guarding the client's own error signal
        let sentiment = match self.sentiment.analyze(text).await {
            Ok(score) => score,
            Err(e) => {
                warn!("sentiment analysis failed: {e}");
                metrics::counter!("clamor_enrichment_fallbacks_total", "step" => "sentiment")
                    .increment(1);
                SentimentScore::unknown()
            }
        };
        debug!(sentiment = %sentiment.sentiment, "sentiment resolved");

        // Optional, log-only probes; results are not persisted
        if let Some(spam) = &self.spam {
            let verdict = match spam.check(text).await {
                Ok(v) => v,
                Err(e) => {
                    warn!("spam check failed: {e}");
                    SpamVerdict::clean()
                }
            };
            debug!(
                is_spam = verdict.is_spam,
                score = verdict.score,
                "spam verdict"
            );
        }
        if let Some(geo) = &self.geo {
            match geo.locate(client_ip).await {
                Ok(location) => debug!(ip = %location.ip, status = ?location.status, "geo result"),
                Err(e) => warn!("geolocation failed: {e}"),
            }
        }

        // Step 2-3: persist with placeholder category; the one fatal step
        let record = NewComplaint::new(text).with_sentiment(sentiment.sentiment);
        let mut record = match self.store.create(record).await {
            Ok(r) => r,
            Err(e) => {
                error!("database error while creating complaint: {e}");
                return Err(e);
            }
        };
        info!(id = record.id, "complaint created");
        metrics::counter!("clamor_complaints_created_total").increment(1);

        // Step 4: optional category classification and update
        if let Some(classifier) = &self.category {
            match classifier.classify(text).await {
                Ok(label) => {
                    record.category = label.category;
                    match self.store.update(record.clone()).await {
                        Ok(updated) => {
                            record = updated;
                            info!(
                                id = record.id,
                                category = %record.category,
                                "category updated"
                            );
                        }
                        Err(e) => {
                            // Category stays at its placeholder; non-fatal
                            warn!(id = record.id, "category update failed: {e}");
                            record.category = Category::Other;
                        }
                    }
                }
                Err(e) => {
                    warn!(id = record.id, "category classification failed: {e}");
                    metrics::counter!("clamor_enrichment_fallbacks_total", "step" => "category")
                        .increment(1);
                }
            }
        }

        Ok(record)
    }
}
