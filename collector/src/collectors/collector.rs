use crate::error::ScrapeError;
use challengize_config::{
    Stage,
    StageRange,
};
use std::{
    future::Future,
    pin::Pin,
};
use strum::Display;

/// Kind of table scraped from the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Users,
    Teams,
}

/// Trait for scraping one category of scores into the registry
pub trait Collector: Send + Sync {
    /// The category this collector scrapes
    fn category(&self) -> Category;

    /// Stages that are scraped every cycle
    fn stages(&self) -> StageRange;

    /// Fetch, decode and publish the scores of one stage. Returns the number of samples written.
    fn collect(&self, stage: Stage) -> Pin<Box<dyn Future<Output = Result<usize, ScrapeError>> + Send + '_>>;
}
