use crate::{
    collectors::{
        CycleReport,
        Orchestrator,
    },
    error::CycleError,
    metrics::ScoreRegistry,
};
use chrono::Utc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Runs a collection cycle right away and then once per interval until cancelled.
pub struct Scheduler {
    orchestrator: Orchestrator,
    registry: ScoreRegistry,
    interval: Duration,
}

impl Scheduler {
    pub fn new(orchestrator: Orchestrator, registry: ScoreRegistry, interval: Duration) -> Self {
        Self {
            orchestrator,
            registry,
            interval,
        }
    }

    /// Loops until `cancel` fires, also in the middle of a cycle.
    ///
    /// Ticks are aligned to the start of the first cycle. A cycle that overruns the interval is
    /// followed by the next one right away and the missed ticks are dropped.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(interval = ?self.interval, "scheduler started");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {},
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!("collection cycle aborted by shutdown");
                    break;
                },
                _ = self.refresh() => {},
            }
        }

        info!("scheduler stopped");
    }

    /// Runs one cycle and records the refresh time if every pair succeeded.
    pub async fn refresh(&self) -> Result<CycleReport, CycleError> {
        info!("refreshing points");

        match self.orchestrator.run_cycle().await {
            Ok(report) => {
                self.registry.set_last_refresh(Utc::now().timestamp());
                info!(pairs = report.pairs, samples = report.samples, "refresh completed");
                Ok(report)
            }
            Err(err) => {
                error!(failed = err.len(), "refresh failed: {err}");
                Err(err)
            }
        }
    }
}
