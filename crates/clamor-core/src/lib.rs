//! Clamor Core
//!
//! Domain types and error handling shared across the Clamor complaint
//! service: the persisted `Complaint` record, its closed enumerations
//! (status, sentiment, category), and the typed results produced by
//! the external classification clients.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    Category, CategoryLabel, Complaint, GeoLocation, GeoStatus, NewComplaint, Sentiment,
    SentimentScore, SpamVerdict, Status,
};
