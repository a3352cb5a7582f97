use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fmt,
    time::Duration,
};
use url::Url;

/// Where and how the dashboard is scraped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Dashboard endpoint, e.g. `https://www.challengize.com/dashboard.action`.
    pub base_url: Url,
    /// Query marker that selects the per-user table.
    pub user_query: String,
    /// Query marker that selects the per-team table.
    pub team_query: String,
    #[serde(with = "crate::duration")]
    pub request_timeout: Duration,
}

/// Session cookies of a logged in dashboard user. Obtained out of band and attached as-is.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    /// Value of the `JSESSIONID` cookie.
    #[serde(default)]
    pub session_id: String,
    /// Value of the long lived `remember` cookie.
    #[serde(default)]
    pub remember: String,
}

impl Credentials {
    pub fn new(session_id: impl ToString, remember: impl ToString) -> Self {
        Self {
            session_id: session_id.to_string(),
            remember: remember.to_string(),
        }
    }

    /// Value for the `Cookie` request header.
    pub fn cookie_header(&self) -> String {
        format!("JSESSIONID={}; remember={}", self.session_id, self.remember)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &str| if value.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("Credentials")
            .field("session_id", &redact(&self.session_id))
            .field("remember", &redact(&self.remember))
            .finish()
    }
}
