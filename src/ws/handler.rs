//! Axum WebSocket upgrade handler.

use axum::extract::ws::{WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::config::PublishSettings;
use crate::error::PublisherError;

/// Optional query parameters of the upgrade request.
#[derive(Debug, Default, Deserialize)]
pub struct StreamParams {
    /// Overrides the configured stream variant for this connection.
    pub variant: Option<String>,
}

/// `GET /*` — Upgrade HTTP connection to WebSocket and start streaming.
///
/// # Errors
///
/// Returns [`PublisherError::InvalidVariant`] (HTTP 400) if `?variant=`
/// names an unknown variant.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<StreamParams>,
    State(state): State<AppState>,
) -> Result<Response, PublisherError> {
    let mut settings = state.settings;
    if let Some(name) = params.variant.as_deref() {
        settings.variant = name.parse()?;
    }
    let token = state.shutdown.child_token();

    Ok(ws.on_upgrade(move |socket| supervise(socket, settings, token)))
}

/// Spawns the connection's publishing task and logs how it ended.
async fn supervise(socket: WebSocket, settings: PublishSettings, token: CancellationToken) {
    let conn_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("ws_connection", %conn_id, variant = %settings.variant);
    tracing::info!(%conn_id, variant = %settings.variant, "ws connection opened");

    let handle = tokio::spawn(run_connection(socket, settings, token).instrument(span));

    match handle.await {
        Ok(Ok(sent)) => tracing::info!(%conn_id, sent, "publisher stopped"),
        Ok(Err(err)) if err.is_connection_level() => {
            tracing::warn!(%conn_id, error = %err, "publisher ended");
        }
        Ok(Err(err)) => tracing::error!(%conn_id, error = %err, "publisher failed"),
        Err(err) => tracing::error!(%conn_id, error = %err, "publisher task failed"),
    }
}
