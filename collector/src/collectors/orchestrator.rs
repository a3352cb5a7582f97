use crate::{
    collectors::{
        Collector,
        TeamCollector,
        UserCollector,
    },
    error::{
        CollectError,
        CycleError,
    },
    fetch::Fetch,
    metrics::ScoreRegistry,
};
use challengize_config::Config;
use std::sync::Arc;

/// Outcome of a cycle in which every pair succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// (category, stage) pairs that were scraped.
    pub pairs: usize,
    /// Samples written to the registry.
    pub samples: usize,
}

/// Runs every collector over its stages, one pair after the other.
pub struct Orchestrator {
    collectors: Vec<Box<dyn Collector>>,
}

impl Orchestrator {
    /// Creates the user and team collectors sharing one fetcher and one registry.
    pub fn new(config: &Config, fetcher: Arc<dyn Fetch>, registry: ScoreRegistry) -> Self {
        Self::with_collectors(vec![
            Box::new(UserCollector::new(fetcher.clone(), registry.clone(), config.stages.users)),
            Box::new(TeamCollector::new(fetcher, registry, config.stages.teams)),
        ])
    }

    pub fn with_collectors(collectors: Vec<Box<dyn Collector>>) -> Self {
        Self { collectors }
    }

    /// Scrapes every (category, stage) pair once.
    ///
    /// A failing pair does not stop the others. The cycle only succeeds if no pair failed, otherwise
    /// the error lists every failure in the order the pairs were attempted.
    pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        let mut report = CycleReport::default();
        let mut failures = Vec::new();

        for collector in &self.collectors {
            let category = collector.category();
            for stage in collector.stages() {
                report.pairs += 1;
                match collector.collect(stage).await {
                    Ok(samples) => {
                        debug!(%category, stage, samples, "collected scores");
                        report.samples += samples;
                    }
                    Err(source) => {
                        warn!(%category, stage, error = %source, "collecting scores failed");
                        failures.push(CollectError::new(category, stage, source));
                    }
                }
            }
        }

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(CycleError { failures })
        }
    }
}
