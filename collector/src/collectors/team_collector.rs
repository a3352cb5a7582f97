use crate::{
    collectors::{
        Category,
        Collector,
    },
    decode::decode_teams,
    error::ScrapeError,
    fetch::Fetch,
    metrics::ScoreRegistry,
};
use challengize_config::{
    Stage,
    StageRange,
};
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
};

/// Publishes the points of every team per stage
pub struct TeamCollector {
    fetcher: Arc<dyn Fetch>,
    registry: ScoreRegistry,
    stages: StageRange,
}

impl TeamCollector {
    pub fn new(fetcher: Arc<dyn Fetch>, registry: ScoreRegistry, stages: StageRange) -> Self {
        Self {
            fetcher,
            registry,
            stages,
        }
    }
}

impl Collector for TeamCollector {
    fn category(&self) -> Category {
        Category::Teams
    }

    fn stages(&self) -> StageRange {
        self.stages
    }

    fn collect(&self, stage: Stage) -> Pin<Box<dyn Future<Output = Result<usize, ScrapeError>> + Send + '_>> {
        Box::pin(async move {
            let body = self.fetcher.fetch(Category::Teams, stage).await?;
            let teams = decode_teams(&body, stage)?;

            for team in &teams {
                self.registry.set_team_points(&team.team, team.stage, team.points);
            }

            trace!(stage, count = teams.len(), "published team points");
            Ok(teams.len())
        })
    }
}
