use crate::collectors::Category;
use challengize_config::Stage;
use std::fmt;

/// Failure of a single request against the dashboard, or of setting up the client for it.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure.
    #[error("request to the dashboard failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The dashboard answered, but not with 200. Redirects end up here as well since they are
    /// never followed; an expired session typically redirects to the login page.
    #[error("dashboard answered with non-OK status code {code}")]
    NonOkStatus { code: u16 },
    /// The configured credentials contain bytes that are not allowed in a header.
    #[error("credentials cannot be sent as a cookie: {0}")]
    InvalidCookie(#[from] reqwest::header::InvalidHeaderValue),
}

/// The body did not have the expected shape. Nothing of it is used.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Why scraping one (category, stage) pair failed.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A failed (category, stage) pair.
#[derive(thiserror::Error, Debug)]
#[error("collecting {category} for stage {stage} failed: {source}")]
pub struct CollectError {
    pub category: Category,
    pub stage: Stage,
    #[source]
    pub source: ScrapeError,
}

impl CollectError {
    pub fn new(category: Category, stage: Stage, source: impl Into<ScrapeError>) -> Self {
        Self {
            category,
            stage,
            source: source.into(),
        }
    }
}

/// Every pair that failed during one collection cycle, in the order they were attempted.
#[derive(Debug)]
pub struct CycleError {
    pub failures: Vec<CollectError>,
}

impl CycleError {
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollectError> {
        self.failures.iter()
    }
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} scrape(s) failed", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  * {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CycleError {}
