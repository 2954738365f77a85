//! DevOps demo service.
//!
//! A small JSON HTTP service meant to be built, containerized and deployed
//! by a CI/CD pipeline. It exposes informational endpoints plus liveness and
//! readiness probes for an orchestrator:
//!
//! ```text
//! GET  /           greeting, version, hostname, timestamp
//! GET  /health     liveness probe
//! GET  /ready      readiness probe
//! GET  /api/info   application, version, hostname, environment, timestamp
//! POST /api/echo   echoes the JSON body under "received"
//! ```
//!
//! Unknown routes get `{"error": "Not found", "status": 404}`; any failure
//! inside a handler, panics included, gets a JSON 500.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: HTTP router and handlers
//! - [`metrics`]: Request metrics and Prometheus exporter
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, DemoError, Result};
