//! Clamor Classifiers
//!
//! Clients for the external classification services that enrich a
//! complaint: sentiment analysis, spam checking, IP geolocation, and
//! LLM-based category classification.
//!
//! Every client follows the same contract: upstream values outside the
//! expected enumeration and transport-level failures are absorbed into
//! a designated fallback value (logged as warnings), so a flaky or
//! misbehaving service can never abort complaint intake. The `Err` arm
//! of each capability trait is reserved for internal client failures
//! and is the only signal that crosses the client boundary.

pub mod capability;
pub mod category;
pub mod error;
pub mod geo;
pub mod sentiment;
pub mod spam;

pub use capability::{CategoryClassifier, GeoLocator, SentimentAnalyzer, SpamChecker};
pub use category::{OpenAiCategory, OpenRouterCategory};
pub use error::ClassifierError;
pub use geo::IpApiGeo;
pub use sentiment::ApiLayerSentiment;
pub use spam::{ApiLayerSpam, NinjaSpam};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::capability::{CategoryClassifier, GeoLocator, SentimentAnalyzer, SpamChecker};
    pub use crate::category::{OpenAiCategory, OpenRouterCategory};
    pub use crate::error::ClassifierError;
    pub use crate::geo::IpApiGeo;
    pub use crate::sentiment::ApiLayerSentiment;
    pub use crate::spam::{ApiLayerSpam, NinjaSpam};
}
