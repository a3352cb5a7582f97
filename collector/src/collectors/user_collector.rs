use crate::{
    collectors::{
        Category,
        Collector,
    },
    decode::decode_users,
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

/// Publishes the points of every user per stage
pub struct UserCollector {
    fetcher: Arc<dyn Fetch>,
    registry: ScoreRegistry,
    stages: StageRange,
}

impl UserCollector {
    pub fn new(fetcher: Arc<dyn Fetch>, registry: ScoreRegistry, stages: StageRange) -> Self {
        Self {
            fetcher,
            registry,
            stages,
        }
    }
}

impl Collector for UserCollector {
    fn category(&self) -> Category {
        Category::Users
    }

    fn stages(&self) -> StageRange {
        self.stages
    }

    fn collect(&self, stage: Stage) -> Pin<Box<dyn Future<Output = Result<usize, ScrapeError>> + Send + '_>> {
        Box::pin(async move {
            let body = self.fetcher.fetch(Category::Users, stage).await?;
            let users = decode_users(&body, stage)?;

            for user in &users {
                self.registry
                    .set_user_points(&user.username, &user.team, user.stage, user.points);
            }

            trace!(stage, count = users.len(), "published user points");
            Ok(users.len())
        })
    }
}
