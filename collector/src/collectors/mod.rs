//! # Collectors Module
//!
//! This module contains the scraping logic of the exporter.
//!
//! ## Architecture
//!
//! - **`Collector` trait**: Defines the interface for one category of scores
//! - **`UserCollector`**: Publishes `user_points{user, team, stage}`
//! - **`TeamCollector`**: Publishes `team_points{team, stage}`
//! - **`Orchestrator`**: Runs every collector over its stages and aggregates failures
//!
//! ## Data Sources
//!
//! - **Dashboard table endpoints**: fetched through the `Fetch` trait, one request per stage

pub mod collector;
pub mod orchestrator;
pub mod team_collector;
pub mod user_collector;

// Re-export the main types for easy access
pub use collector::{
    Category,
    Collector,
};
pub use orchestrator::{
    CycleReport,
    Orchestrator,
};
pub use team_collector::TeamCollector;
pub use user_collector::UserCollector;
