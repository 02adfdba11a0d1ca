//! Server configuration
//!
//! Loaded from a YAML file with CLI overrides for the listen address;
//! API keys may also come from the environment so credentials stay out
//! of config files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use clamor_classifiers::{category, geo, sentiment, spam};

/// Listen overrides supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub listen: Option<String>,
    pub port: Option<u16>,
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Sentiment analysis service (mandatory capability)
    #[serde(default)]
    pub sentiment: SentimentConfig,

    /// Category classification service (optional capability)
    #[serde(default)]
    pub category: CategoryConfig,

    /// Spam check service (disabled by default)
    #[serde(default)]
    pub spam: SpamConfig,

    /// IP geolocation service (disabled by default)
    #[serde(default)]
    pub geo: GeoConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            sentiment: SentimentConfig::default(),
            category: CategoryConfig::default(),
            spam: SpamConfig::default(),
            geo: GeoConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file, environment, and CLI overrides
    pub fn load(config_path: &str, cli: &CliOverrides) -> anyhow::Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        config.apply_env();

        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }
        if let Some(port) = cli.port {
            config.port = port;
        }

        Ok(config)
    }

    /// Fill API keys from the environment when not set in the file
    fn apply_env(&mut self) {
        if self.sentiment.api_key.is_empty() {
            if let Ok(key) = std::env::var("SENTIMENT_API_KEY") {
                self.sentiment.api_key = key;
            }
        }

        if self.category.api_key.is_empty() {
            let var = match self.category.provider {
                CategoryProvider::OpenAi => "OPENAI_API_KEY",
                CategoryProvider::OpenRouter => "OPENROUTER_API_KEY",
            };
            if let Ok(key) = std::env::var(var) {
                self.category.api_key = key;
            }
        }

        if self.spam.api_key.is_empty() {
            let var = match self.spam.provider {
                SpamProvider::ApiLayer => "APILAYER_SPAMCHECK_API_KEY",
                SpamProvider::Ninja => "NINJA_SPAMCHECK_API_KEY",
            };
            if let Ok(key) = std::env::var(var) {
                self.spam.api_key = key;
            }
        }
    }
}

/// Sentiment service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// APILayer key; required at startup
    #[serde(default)]
    pub api_key: String,

    /// Endpoint URL
    #[serde(default = "default_sentiment_url")]
    pub api_url: String,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_sentiment_url(),
        }
    }
}

/// Which category classification backend to use
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryProvider {
    #[default]
    OpenAi,
    OpenRouter,
}

/// Category service configuration
///
/// An empty key disables the capability entirely; the orchestrator
/// then skips the category step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    #[serde(default)]
    pub provider: CategoryProvider,

    #[serde(default)]
    pub api_key: String,

    /// Endpoint URL; provider default when absent
    pub api_url: Option<String>,

    /// Model name override
    pub model: Option<String>,

    /// SOCKS5 proxy URL (OpenRouter only)
    pub proxy: Option<String>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            provider: CategoryProvider::default(),
            api_key: String::new(),
            api_url: None,
            model: None,
            proxy: None,
        }
    }
}

impl CategoryConfig {
    /// Whether the capability is configured at all
    pub fn enabled(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Endpoint to use for the selected provider
    pub fn endpoint(&self) -> String {
        self.api_url.clone().unwrap_or_else(|| {
            match self.provider {
                CategoryProvider::OpenAi => category::OPENAI_API_URL,
                CategoryProvider::OpenRouter => category::OPENROUTER_API_URL,
            }
            .to_string()
        })
    }
}

/// Which spam check backend to use
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpamProvider {
    #[default]
    ApiLayer,
    Ninja,
}

/// Spam service configuration (an available but default-off capability)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpamConfig {
    /// Activate the spam probe in the creation workflow
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub provider: SpamProvider,

    #[serde(default)]
    pub api_key: String,

    /// Endpoint URL; provider default when absent
    pub api_url: Option<String>,

    /// Score threshold passed to the APILayer backend
    #[serde(default = "default_spam_threshold")]
    pub threshold: f64,
}

impl Default for SpamConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: SpamProvider::default(),
            api_key: String::new(),
            api_url: None,
            threshold: default_spam_threshold(),
        }
    }
}

impl SpamConfig {
    /// Endpoint to use for the selected provider
    pub fn endpoint(&self) -> String {
        self.api_url.clone().unwrap_or_else(|| {
            match self.provider {
                SpamProvider::ApiLayer => spam::APILAYER_API_URL,
                SpamProvider::Ninja => spam::NINJA_API_URL,
            }
            .to_string()
        })
    }
}

/// Geolocation service configuration (default off)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    /// Activate the geolocation probe in the creation workflow
    #[serde(default)]
    pub enabled: bool,

    /// Endpoint URL
    #[serde(default = "default_geo_url")]
    pub api_url: String,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_geo_url(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_sentiment_url() -> String {
    sentiment::DEFAULT_API_URL.to_string()
}

fn default_geo_url() -> String {
    geo::DEFAULT_API_URL.to_string()
}

fn default_spam_threshold() -> f64 {
    spam::DEFAULT_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_optional_capabilities() {
        let config = ServerConfig::default();
        assert!(!config.category.enabled());
        assert!(!config.spam.enabled);
        assert!(!config.geo.enabled);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn yaml_overrides_defaults() {
        let yaml = r#"
port: 9000
sentiment:
  api_key: sk-sentiment
category:
  provider: openrouter
  api_key: sk-router
  proxy: socks5://127.0.0.1:1080
spam:
  enabled: true
  provider: ninja
  api_key: sk-ninja
"#;
        let config: ServerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.category.provider, CategoryProvider::OpenRouter);
        assert!(config.category.enabled());
        assert_eq!(
            config.category.endpoint(),
            category::OPENROUTER_API_URL
        );
        assert!(config.spam.enabled);
        assert_eq!(config.spam.endpoint(), spam::NINJA_API_URL);
        assert_eq!(config.spam.threshold, spam::DEFAULT_THRESHOLD);
        assert_eq!(config.listen, "0.0.0.0");
    }
}
