//! Error types for the classification clients

/// Errors surfaced past a classifier client boundary
///
/// Transport failures and malformed upstream payloads never produce
/// these; those are absorbed into fallback values inside the client.
/// Each variant is the single failure signal its client may raise.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Sentiment analysis failed irrecoverably
    #[error("sentiment analysis error: {0}")]
    Sentiment(String),

    /// Spam check failed irrecoverably
    #[error("spam check error: {0}")]
    Spam(String),

    /// IP geolocation failed irrecoverably
    #[error("geolocation error: {0}")]
    Geo(String),

    /// Category classification failed irrecoverably
    #[error("category classification error: {0}")]
    Category(String),

    /// Client construction failed (missing credential, bad proxy, ...)
    #[error("classifier configuration error: {0}")]
    Config(String),
}

impl ClassifierError {
    /// Create a new sentiment error
    pub fn sentiment(msg: impl Into<String>) -> Self {
        Self::Sentiment(msg.into())
    }

    /// Create a new spam error
    pub fn spam(msg: impl Into<String>) -> Self {
        Self::Spam(msg.into())
    }

    /// Create a new geolocation error
    pub fn geo(msg: impl Into<String>) -> Self {
        Self::Geo(msg.into())
    }

    /// Create a new category error
    pub fn category(msg: impl Into<String>) -> Self {
        Self::Category(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<ClassifierError> for clamor_core::Error {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::Config(msg) => clamor_core::Error::Config(msg),
            other => clamor_core::Error::Classifier(other.to_string()),
        }
    }
}
