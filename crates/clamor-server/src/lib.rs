//! Clamor Server
//!
//! The HTTP surface of the complaint service: request/response
//! mapping onto the enrichment orchestrator and the record store,
//! plus configuration loading and process bootstrap.

pub mod config;
pub mod routes;
pub mod state;

pub use config::{CliOverrides, ServerConfig};
pub use routes::create_router;
pub use state::AppState;
