use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fmt,
    ops::RangeInclusive,
};

/// Index of a competition phase on the dashboard.
pub type Stage = u32;

/// Inclusive range of stages that is scraped every cycle.
///
/// The dashboard answers with 404 for stages that have not started yet, so the upper bound is
/// whatever is known to work for the running competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRange {
    pub first: Stage,
    pub last: Stage,
}

impl StageRange {
    pub const fn new(first: Stage, last: Stage) -> Self {
        Self { first, last }
    }

    pub fn iter(&self) -> RangeInclusive<Stage> {
        self.first..=self.last
    }

    pub fn is_empty(&self) -> bool {
        self.first > self.last
    }
}

impl IntoIterator for StageRange {
    type Item = Stage;
    type IntoIter = RangeInclusive<Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for StageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.first, self.last)
    }
}

/// Stage ranges per data category. They are independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagesConfig {
    pub users: StageRange,
    pub teams: StageRange,
}
