use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    routing::get,
    Router,
};
use challengize_collector::ScoreRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: ScoreRegistry,
}

pub fn create_router(registry: ScoreRegistry) -> Router {
    let state = AppState { registry };

    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.registry.snapshot();
    trace!(bytes = body.len(), "serving metrics");
    ([(CONTENT_TYPE, prometheus::TEXT_FORMAT)], body)
}
