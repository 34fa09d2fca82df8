use crate::cache::StoryCache;
use crate::client::HnClient;
use crate::config::{Cli, Mode};
use crate::handler::{health_handler, top_stories_handler, AppState, StorySource};
use crate::orchestrator::Orchestrator;
use crate::refresher::StoryRefresher;
use crate::render::HtmlRenderer;
use crate::resolver::ItemResolver;
use crate::types::{HnApi, QuietHnError, Result};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Build the HTTP router (page + health).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(top_stories_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Wire up the client, story source and (in cached mode) the refresher, then
/// serve until SIGINT/SIGTERM.
pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;

    let api: Arc<dyn HnApi> = Arc::new(HnClient::new(cli.fetch_config())?);
    let orchestrator = Orchestrator::new(ItemResolver::new(api.clone()), cli.max_concurrency)?;
    let shutdown_token = CancellationToken::new();

    let source = match cli.mode {
        Mode::Live => StorySource::live(api, orchestrator),
        Mode::Cached => {
            let cache = Arc::new(StoryCache::new());
            let refresher = StoryRefresher::new(
                api,
                orchestrator,
                cache.clone(),
                cli.num_stories,
                cli.refresh_interval(),
            );
            tokio::spawn(refresher.run(shutdown_token.child_token()));
            StorySource::cached(cache)
        }
    };

    let state = AppState {
        source: Arc::new(source),
        renderer: Arc::new(HtmlRenderer::new()),
        num_stories: cli.num_stories,
    };

    info!(
        "Serving {} top stories in {:?} mode (max concurrency {})",
        cli.num_stories, cli.mode, cli.max_concurrency
    );

    serve(router(state), cli.port, shutdown_token).await
}

/// Bind `port` and serve `app` with graceful shutdown.
///
/// `shutdown_token` is cancelled once a signal arrives so background tasks
/// stop alongside the server.
pub async fn serve(app: Router, port: u16, shutdown_token: CancellationToken) -> Result<()> {
    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| QuietHnError::Bind {
            address: bind_addr.clone(),
            source: e,
        })?;
    info!("Listening on {}", listener.local_addr()?);
    info!("  - GET /        (top stories)");
    info!("  - GET /health  (health check)");

    let server_shutdown = shutdown_token.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            server_shutdown.cancel();
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGTERM or SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
