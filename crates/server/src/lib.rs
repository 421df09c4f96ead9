//! HTTP server for the blood report analyzer.
//!
//! The [`ReportOrchestrator`] ties the reference catalog, the range
//! evaluator and the classifier together; [`routes`] exposes it over HTTP.

pub mod config;
pub mod logging;
pub mod orchestrator;
pub mod pages;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use orchestrator::{BloodReport, ReportOrchestrator};
pub use routes::{build_router, ApiError, AppState};
