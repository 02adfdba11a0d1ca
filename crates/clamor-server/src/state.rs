//! Application state
//!
//! Wires the configured classifier clients, the store, and the
//! orchestrator together into the state shared by all handlers.

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::info;

use clamor_classifiers::capability::{CategoryClassifier, GeoLocator, SpamChecker};
use clamor_classifiers::{
    ApiLayerSentiment, ApiLayerSpam, IpApiGeo, NinjaSpam, OpenAiCategory, OpenRouterCategory,
};
use clamor_enrich::Orchestrator;
use clamor_store::{ComplaintStore, MemoryStore};

use crate::config::{CategoryProvider, ServerConfig, SpamProvider};

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub store: Arc<dyn ComplaintStore>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Assemble state from pre-built collaborators (used by tests)
    pub fn new(
        orchestrator: Arc<Orchestrator>,
        store: Arc<dyn ComplaintStore>,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            orchestrator,
            store,
            metrics,
        }
    }

    /// Build the full collaborator graph from configuration
    ///
    /// Fails fast on missing mandatory credentials; an absent category
    /// key merely disables that capability.
    pub fn from_config(
        config: &ServerConfig,
        metrics: Option<PrometheusHandle>,
    ) -> anyhow::Result<Self> {
        let store: Arc<dyn ComplaintStore> = Arc::new(MemoryStore::new());

        let sentiment = ApiLayerSentiment::new(
            config.sentiment.api_key.clone(),
            config.sentiment.api_url.clone(),
        )?;

        let mut orchestrator = Orchestrator::new(Arc::new(sentiment), store.clone());

        if config.category.enabled() {
            orchestrator = orchestrator.with_category(build_category(config)?);
            info!(provider = ?config.category.provider, "category classification enabled");
        } else {
            info!("category classification disabled: no API key configured");
        }

        if config.spam.enabled {
            orchestrator = orchestrator.with_spam(build_spam(config)?);
            info!(provider = ?config.spam.provider, "spam probe enabled");
        }

        if config.geo.enabled {
            let geo: Arc<dyn GeoLocator> = Arc::new(IpApiGeo::new(config.geo.api_url.clone())?);
            orchestrator = orchestrator.with_geo(geo);
            info!("geolocation probe enabled");
        }

        Ok(Self::new(Arc::new(orchestrator), store, metrics))
    }
}

fn build_category(config: &ServerConfig) -> anyhow::Result<Arc<dyn CategoryClassifier>> {
    let cfg = &config.category;
    let classifier: Arc<dyn CategoryClassifier> = match cfg.provider {
        CategoryProvider::OpenAi => {
            let mut client = OpenAiCategory::new(cfg.api_key.clone(), cfg.endpoint())?;
            if let Some(model) = &cfg.model {
                client = client.with_model(model);
            }
            Arc::new(client)
        }
        CategoryProvider::OpenRouter => {
            let mut client =
                OpenRouterCategory::new(cfg.api_key.clone(), cfg.endpoint(), cfg.proxy.as_deref())?;
            if let Some(model) = &cfg.model {
                client = client.with_model(model);
            }
            Arc::new(client)
        }
    };
    Ok(classifier)
}

fn build_spam(config: &ServerConfig) -> anyhow::Result<Arc<dyn SpamChecker>> {
    let cfg = &config.spam;
    let checker: Arc<dyn SpamChecker> = match cfg.provider {
        SpamProvider::ApiLayer => Arc::new(
            ApiLayerSpam::new(cfg.api_key.clone(), cfg.endpoint())?.with_threshold(cfg.threshold),
        ),
        SpamProvider::Ninja => Arc::new(NinjaSpam::new(cfg.api_key.clone(), cfg.endpoint())?),
    };
    Ok(checker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    #[test]
    fn missing_sentiment_key_fails_fast() {
        let config = ServerConfig::default();
        assert!(AppState::from_config(&config, None).is_err());
    }

    #[test]
    fn missing_category_key_disables_the_capability() {
        let mut config = ServerConfig::default();
        config.sentiment.api_key = "sk-test".to_string();
        let state = AppState::from_config(&config, None).unwrap();
        assert!(!state.orchestrator.category_enabled());
    }

    #[test]
    fn category_key_enables_the_capability() {
        let mut config = ServerConfig::default();
        config.sentiment.api_key = "sk-test".to_string();
        config.category.api_key = "sk-category".to_string();
        let state = AppState::from_config(&config, None).unwrap();
        assert!(state.orchestrator.category_enabled());
    }
}
