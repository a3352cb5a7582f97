//! Serves the score registry in the Prometheus text format.

#[macro_use]
extern crate tracing;

pub mod router;

use challengize_collector::ScoreRegistry;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub use router::create_router;

/// Serves `/metrics` and `/healthz` on `listener` until `cancel` fires.
pub async fn serve(listener: TcpListener, registry: ScoreRegistry, cancel: CancellationToken) -> std::io::Result<()> {
    let app = create_router(registry);

    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "serving metrics");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    info!("metrics server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::net::SocketAddr;

    async fn spawn(registry: ScoreRegistry) -> (SocketAddr, CancellationToken, tokio::task::JoinHandle<std::io::Result<()>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(serve(listener, registry, cancel.clone()));
        (addr, cancel, task)
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_the_exposition() {
        let registry = ScoreRegistry::new(Some("challengize")).unwrap();
        registry.set_user_points("alice", "red", 1, 42);
        registry.set_team_points("red", 1, 42);
        let (addr, cancel, task) = spawn(registry.clone()).await;

        let response = reqwest::get(format!("http://{addr}/metrics")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response.headers()[reqwest::header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
        let body = response.text().await.unwrap();
        assert_eq!(body, registry.snapshot());
        assert!(body.contains(r#"challengize_user_points{stage="1",team="red",user="alice"} 42"#));

        cancel.cancel();
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn scrape_sees_later_updates() {
        let registry = ScoreRegistry::new(Some("challengize")).unwrap();
        let (addr, cancel, task) = spawn(registry.clone()).await;
        let url = format!("http://{addr}/metrics");

        let before = reqwest::get(&url).await.unwrap().text().await.unwrap();
        assert!(!before.contains("challengize_team_points{"));

        registry.set_team_points("blue", 2, 7);
        let after = reqwest::get(&url).await.unwrap().text().await.unwrap();
        assert!(after.contains(r#"challengize_team_points{stage="2",team="blue"} 7"#), "{after}");

        cancel.cancel();
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn healthz_answers() {
        let (addr, cancel, task) = spawn(ScoreRegistry::new(None).unwrap()).await;

        let response = reqwest::get(format!("http://{addr}/healthz")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "OK");

        let response = reqwest::get(format!("http://{addr}/nope")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

        cancel.cancel();
        task.await.unwrap().unwrap();
    }
}
