use crate::{
    collectors::Category,
    error::FetchError,
};
use bytes::Bytes;
use challengize_config::{
    Config,
    Credentials,
    Stage,
    UpstreamConfig,
};
use chrono::Utc;
use reqwest::{
    header::{
        HeaderValue,
        ACCEPT,
        COOKIE,
    },
    StatusCode,
};
use std::{
    future::Future,
    pin::Pin,
};
use url::Url;

/// Retrieves the raw table of one category and stage.
pub trait Fetch: Send + Sync {
    fn fetch(&self, category: Category, stage: Stage) -> Pin<Box<dyn Future<Output = Result<Bytes, FetchError>> + Send + '_>>;
}

/// Fetches tables from the dashboard with the configured session cookies.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    upstream: UpstreamConfig,
    cookie: HeaderValue,
}

impl HttpFetcher {
    pub fn new(upstream: UpstreamConfig, credentials: Credentials) -> Result<Self, FetchError> {
        // A redirect means the session is gone and the dashboard wants us on its login page.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(upstream.request_timeout)
            .build()?;

        let mut cookie = HeaderValue::from_str(&credentials.cookie_header())?;
        cookie.set_sensitive(true);

        Ok(Self {
            client,
            upstream,
            cookie,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(config.upstream.clone(), config.credentials.clone())
    }

    /// `<base>?<marker>&selectedStage=<stage>&_=<timestamp>`, the trailing timestamp only busts caches.
    pub fn url(&self, category: Category, stage: Stage, timestamp: i64) -> Url {
        let marker = match category {
            Category::Users => &self.upstream.user_query,
            Category::Teams => &self.upstream.team_query,
        };

        let mut url = self.upstream.base_url.clone();
        url.query_pairs_mut()
            .append_key_only(marker)
            .append_pair("selectedStage", &stage.to_string())
            .append_pair("_", &timestamp.to_string());
        url
    }

    async fn get(&self, category: Category, stage: Stage) -> Result<Bytes, FetchError> {
        let url = self.url(category, stage, Utc::now().timestamp());
        debug!(%category, stage, %url, "fetching table");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json;charset=UTF-8")
            .header(COOKIE, self.cookie.clone())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::NonOkStatus { code: status.as_u16() });
        }

        Ok(response.bytes().await?)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, category: Category, stage: Stage) -> Pin<Box<dyn Future<Output = Result<Bytes, FetchError>> + Send + '_>> {
        Box::pin(self.get(category, stage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::RawQuery,
        http::{
            header::LOCATION,
            HeaderMap,
        },
        response::IntoResponse,
        routing::get,
        Router,
    };
    use pretty_assertions::assert_eq;
    use std::{
        net::SocketAddr,
        time::Duration,
    };
    use tokio::net::TcpListener;

    async fn spawn_upstream(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        addr
    }

    fn fetcher(addr: SocketAddr, timeout: Duration) -> HttpFetcher {
        let upstream = UpstreamConfig {
            base_url: format!("http://{addr}/dashboard.action").parse().unwrap(),
            user_query: "getUserTableData".to_string(),
            team_query: "getTeamTableData".to_string(),
            request_timeout: timeout,
        };
        HttpFetcher::new(upstream, Credentials::new("session-token", "remember-token")).unwrap()
    }

    /// Answers with what the request looked like.
    async fn echo(RawQuery(query): RawQuery, headers: HeaderMap) -> impl IntoResponse {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };
        axum::Json(serde_json::json!({
            "query": query.unwrap_or_default(),
            "cookie": header("cookie"),
            "accept": header("accept"),
        }))
    }

    #[test]
    fn url_carries_marker_stage_and_timestamp() {
        let fetcher = fetcher("127.0.0.1:1".parse().unwrap(), Duration::from_secs(1));

        assert_eq!(
            fetcher.url(Category::Users, 3, 1700000000).as_str(),
            "http://127.0.0.1:1/dashboard.action?getUserTableData&selectedStage=3&_=1700000000"
        );
        assert_eq!(
            fetcher.url(Category::Teams, 1, 42).as_str(),
            "http://127.0.0.1:1/dashboard.action?getTeamTableData&selectedStage=1&_=42"
        );
    }

    #[test]
    fn credentials_that_cannot_be_sent_are_rejected_up_front() {
        let upstream = fetcher("127.0.0.1:1".parse().unwrap(), Duration::from_secs(1)).upstream;

        let err = HttpFetcher::new(upstream, Credentials::new("session\n", "remember")).unwrap_err();

        assert!(matches!(err, FetchError::InvalidCookie(_)), "{err:?}");
    }

    #[tokio::test]
    async fn sends_cookies_and_accept_header() {
        let addr = spawn_upstream(Router::new().route("/dashboard.action", get(echo))).await;

        let body = fetcher(addr, Duration::from_secs(5))
            .fetch(Category::Users, 2)
            .await
            .unwrap();
        let echoed: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(echoed["cookie"], "JSESSIONID=session-token; remember=remember-token");
        assert_eq!(echoed["accept"], "application/json;charset=UTF-8");
        let query = echoed["query"].as_str().unwrap();
        assert!(query.starts_with("getUserTableData&selectedStage=2&_="), "{query}");
    }

    #[tokio::test]
    async fn redirect_is_not_followed() {
        let router = Router::new()
            .route(
                "/dashboard.action",
                get(|| async { (axum::http::StatusCode::FOUND, [(LOCATION, "/login")]) }),
            )
            .route("/login", get(|| async { r#"{"data": []}"# }));
        let addr = spawn_upstream(router).await;

        let err = fetcher(addr, Duration::from_secs(5))
            .fetch(Category::Users, 1)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::NonOkStatus { code: 302 }), "{err:?}");
    }

    #[tokio::test]
    async fn server_error_is_non_ok() {
        let router = Router::new().route(
            "/dashboard.action",
            get(|| async { axum::http::StatusCode::NOT_FOUND }),
        );
        let addr = spawn_upstream(router).await;

        let err = fetcher(addr, Duration::from_secs(5))
            .fetch(Category::Teams, 9)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::NonOkStatus { code: 404 }), "{err:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let err = fetcher(addr, Duration::from_secs(5))
            .fetch(Category::Users, 1)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let router = Router::new().route(
            "/dashboard.action",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                r#"{"data": []}"#
            }),
        );
        let addr = spawn_upstream(router).await;

        let err = fetcher(addr, Duration::from_millis(100))
            .fetch(Category::Users, 1)
            .await
            .unwrap_err();

        match err {
            FetchError::Transport(e) => assert!(e.is_timeout(), "{e:?}"),
            other => panic!("expected a timeout, got {other:?}"),
        }
    }
}
