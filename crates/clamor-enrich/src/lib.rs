//! Clamor Enrich
//!
//! The complaint enrichment workflow: a fixed sequence of independent,
//! best-effort classification calls layered around one mandatory
//! persistence step. Classifier failures of any kind are absorbed here
//! with workflow-level fallbacks; only persistence failures abort a
//! request.

pub mod orchestrator;

pub use orchestrator::Orchestrator;
