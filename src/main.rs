//! epoch-publisher server entry point.
//!
//! Binds the WebSocket listener and runs until Ctrl-C.

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use epoch_publisher::api;
use epoch_publisher::app_state::AppState;
use epoch_publisher::config::PublisherConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = PublisherConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        variant = %config.publish.variant,
        encoding = %config.publish.encoding,
        interval_ms = config.publish.interval.as_millis(),
        "starting epoch-publisher"
    );

    let app_state = AppState::new(config.publish);
    let shutdown = app_state.shutdown.clone();

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Cancel every connection task on Ctrl-C
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            return;
        }
        tracing::info!("shutting down...");
        signal_token.cancel();
    });

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}
