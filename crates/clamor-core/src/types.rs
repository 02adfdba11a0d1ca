//! Core types for the Clamor complaint service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow status of a complaint
///
/// Any transition between the two values is legal; only the explicit
/// status-update operation mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Open,
    Closed,
}

impl Default for Status {
    fn default() -> Self {
        Self::Open
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for Status {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(crate::Error::internal(format!(
                "invalid status: {other}"
            ))),
        }
    }
}

/// Sentiment of a complaint as reported by the sentiment service
///
/// `Unknown` is the designated fallback when the service is
/// unreachable or returns a value outside the enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Unknown,
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Complaint category assigned by the category classifier
///
/// `Other` is both the placeholder set at creation time and the
/// fallback for unusable classifier responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technical,
    Billing,
    Other,
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Technical => write!(f, "technical"),
            Self::Billing => write!(f, "billing"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A persisted complaint record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    /// Store-assigned identifier, stable for the record's lifetime
    pub id: i64,

    /// Original complaint text, immutable after creation
    pub text: String,

    /// Current workflow status
    pub status: Status,

    /// Sentiment captured at creation time, never revised
    pub sentiment: Sentiment,

    /// Category; `Other` until (at most) one successful classification
    pub category: Category,

    /// Creation time, set by the store at insert
    pub timestamp: DateTime<Utc>,
}

/// A complaint ready to be inserted; the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub text: String,
    pub status: Status,
    pub sentiment: Sentiment,
    pub category: Category,
}

impl NewComplaint {
    /// Create a record for the given text with default enrichment state
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: Status::Open,
            sentiment: Sentiment::Unknown,
            category: Category::Other,
        }
    }

    /// Set the sentiment captured before insertion
    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = sentiment;
        self
    }
}

/// Result of sentiment analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentScore {
    pub sentiment: Sentiment,
}

impl SentimentScore {
    pub fn new(sentiment: Sentiment) -> Self {
        Self { sentiment }
    }

    /// The fallback result for an unusable or unreachable service
    pub fn unknown() -> Self {
        Self::new(Sentiment::Unknown)
    }
}

/// Result of a spam check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpamVerdict {
    pub is_spam: bool,
    pub score: f64,
}

impl SpamVerdict {
    /// The fallback verdict for an unusable or unreachable service
    pub fn clean() -> Self {
        Self {
            is_spam: false,
            score: 0.0,
        }
    }
}

/// Outcome of an IP geolocation lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoStatus {
    /// Upstream lookup succeeded
    Success,
    /// Upstream lookup failed or was unreachable
    Fail,
    /// Local address, no lookup attempted
    Skipped,
}

/// Basic geolocation data for an IP address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoLocation {
    pub ip: String,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub status: GeoStatus,
}

impl GeoLocation {
    /// An empty result with the given outcome status
    pub fn empty(ip: impl Into<String>, status: GeoStatus) -> Self {
        Self {
            ip: ip.into(),
            country: None,
            region: None,
            city: None,
            status,
        }
    }
}

/// Result of category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryLabel {
    pub category: Category,
}

impl CategoryLabel {
    pub fn new(category: Category) -> Self {
        Self { category }
    }

    /// The fallback label for an unusable or unreachable service
    pub fn other() -> Self {
        Self::new(Category::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Closed).unwrap(), "\"closed\"");
        assert_eq!(
            serde_json::to_string(&Sentiment::Negative).unwrap(),
            "\"negative\""
        );
        assert_eq!(
            serde_json::to_string(&Category::Billing).unwrap(),
            "\"billing\""
        );
    }

    #[test]
    fn status_parses_known_values_only() {
        assert_eq!("open".parse::<Status>().unwrap(), Status::Open);
        assert_eq!("closed".parse::<Status>().unwrap(), Status::Closed);
        assert!("archived".parse::<Status>().is_err());
    }

    #[test]
    fn new_complaint_defaults() {
        let rec = NewComplaint::new("no hot water");
        assert_eq!(rec.status, Status::Open);
        assert_eq!(rec.sentiment, Sentiment::Unknown);
        assert_eq!(rec.category, Category::Other);
    }

    #[test]
    fn fallback_constructors() {
        assert_eq!(SentimentScore::unknown().sentiment, Sentiment::Unknown);
        let v = SpamVerdict::clean();
        assert!(!v.is_spam);
        assert_eq!(v.score, 0.0);
        assert_eq!(CategoryLabel::other().category, Category::Other);
        let g = GeoLocation::empty("127.0.0.1", GeoStatus::Skipped);
        assert!(g.country.is_none() && g.region.is_none() && g.city.is_none());
    }
}
