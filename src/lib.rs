#[macro_use]
extern crate tracing;

mod logging;

use challengize_collector::{
    HttpFetcher,
    Orchestrator,
    Scheduler,
    ScoreRegistry,
};
use challengize_config::{
    get_config_dir,
    Config,
};
use color_eyre::{
    eyre::Context,
    Result,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub use challengize_config::Args;
pub use logging::{
    init_errors,
    init_logging,
};

/// Scrapes on schedule and serves the exposition until Ctrl-C or SIGTERM.
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;
    info!(config_dir = %get_config_dir().display(), "starting");

    let listener = TcpListener::bind(config.listen_address)
        .await
        .with_context(|| format!("failed to listen on {}", config.listen_address))?;

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_signal(cancel.clone()));

    run_until(config, listener, cancel).await
}

/// Scrapes on schedule and serves the exposition on `listener` until `cancel` fires.
pub async fn run_until(config: Config, listener: TcpListener, cancel: CancellationToken) -> Result<()> {
    let registry = ScoreRegistry::new(config.metrics_namespace()).context("failed to create metric registry")?;
    let fetcher = Arc::new(HttpFetcher::from_config(&config).context("failed to create HTTP client")?);
    let orchestrator = Orchestrator::new(&config, fetcher, registry.clone());
    let scheduler = Scheduler::new(orchestrator, registry.clone(), config.refresh_interval);

    let scheduler = tokio::spawn(scheduler.run(cancel.clone()));
    let served = challengize_http::serve(listener, registry, cancel.clone()).await;

    // The server only returns on its own when it failed, make sure the scheduler follows.
    cancel.cancel();
    scheduler.await.context("scheduler task panicked")?;
    served.context("metrics server failed")?;

    Ok(())
}

async fn cancel_on_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = cancel.cancelled() => return,
    }

    info!("signal received, shutting down");
    cancel.cancel();
}
