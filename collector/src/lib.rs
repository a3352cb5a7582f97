//! # Challengize Score Collector
//!
//! Scrapes the per-stage user and team leaderboards of a challengize.com dashboard and keeps the
//! latest points in a Prometheus registry.
//!
//! ## Architecture
//!
//! - **`fetch`**: Authenticated HTTP GET of one leaderboard table
//! - **`decode`**: Turns the table JSON into `UserScore` / `TeamScore` records
//! - **`metrics`**: The `ScoreRegistry` holding the exported gauges
//! - **`collectors`**: One collector per category plus the `Orchestrator` running a full cycle
//! - **`scheduler`**: Repeats the cycle on a fixed interval and stamps the last successful refresh
//!
//! ## Usage
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use challengize_collector::{HttpFetcher, Orchestrator, Scheduler, ScoreRegistry};
//! use std::sync::Arc;
//!
//! let config = challengize_config::Config::default();
//! let registry = ScoreRegistry::new(config.metrics_namespace())?;
//! let fetcher = Arc::new(HttpFetcher::from_config(&config)?);
//! let orchestrator = Orchestrator::new(&config, fetcher, registry.clone());
//! let scheduler = Scheduler::new(orchestrator, registry.clone(), config.refresh_interval);
//!
//! scheduler.refresh().await?;
//! println!("{}", registry.snapshot());
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate tracing;

pub mod collectors;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod metrics;
pub mod scheduler;

#[cfg(test)]
mod testing;

pub use collectors::{
    Category,
    Collector,
    CycleReport,
    Orchestrator,
};
pub use fetch::{
    Fetch,
    HttpFetcher,
};
pub use metrics::ScoreRegistry;
pub use scheduler::Scheduler;
