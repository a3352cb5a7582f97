use crate::{
    collectors::Category,
    error::FetchError,
    fetch::Fetch,
};
use bytes::Bytes;
use challengize_config::Stage;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{
        atomic::{
            AtomicUsize,
            Ordering,
        },
        Mutex,
    },
};

/// Serves canned bodies per (category, stage). Pairs without a body answer with 404.
#[derive(Default)]
pub(crate) struct FakeFetcher {
    responses: Mutex<HashMap<(Category, Stage), Result<String, u16>>>,
    requests: AtomicUsize,
}

impl FakeFetcher {
    pub(crate) fn with_body(self, category: Category, stage: Stage, body: impl ToString) -> Self {
        self.set_body(category, stage, body);
        self
    }

    pub(crate) fn with_status(self, category: Category, stage: Stage, code: u16) -> Self {
        self.responses.lock().unwrap().insert((category, stage), Err(code));
        self
    }

    pub(crate) fn set_body(&self, category: Category, stage: Stage, body: impl ToString) {
        self.responses
            .lock()
            .unwrap()
            .insert((category, stage), Ok(body.to_string()));
    }

    pub(crate) fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Fetch for FakeFetcher {
    fn fetch(&self, category: Category, stage: Stage) -> Pin<Box<dyn Future<Output = Result<Bytes, FetchError>> + Send + '_>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let response = self.responses.lock().unwrap().get(&(category, stage)).cloned();
        Box::pin(async move {
            match response {
                Some(Ok(body)) => Ok(Bytes::from(body)),
                Some(Err(code)) => Err(FetchError::NonOkStatus { code }),
                None => Err(FetchError::NonOkStatus { code: 404 }),
            }
        })
    }
}

pub(crate) fn users_body(users: &[(&str, &str, i64)]) -> String {
    let rows = users
        .iter()
        .map(|(name, team, points)| {
            serde_json::json!({
                "user": {
                    "percentageAndPoints": { "points": points },
                    "idNameAvatar": { "name": name, "teamName": team },
                }
            })
        })
        .collect::<Vec<_>>();
    serde_json::json!({ "data": rows }).to_string()
}

pub(crate) fn teams_body(teams: &[(&str, i64)]) -> String {
    let rows = teams
        .iter()
        .map(|(name, points)| {
            serde_json::json!({
                "team": {
                    "percentageAndPoints": { "points": points },
                    "idNameAvatar": { "name": name },
                }
            })
        })
        .collect::<Vec<_>>();
    serde_json::json!({ "data": rows }).to_string()
}
