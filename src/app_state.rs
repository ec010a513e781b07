//! Shared application state injected into all Axum handlers.

use tokio_util::sync::CancellationToken;

use crate::config::PublishSettings;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Publishing defaults for new connections.
    pub settings: PublishSettings,
    /// Root shutdown token; each connection task gets a child of it.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Creates state with the given defaults and a fresh root token.
    #[must_use]
    pub fn new(settings: PublishSettings) -> Self {
        Self {
            settings,
            shutdown: CancellationToken::new(),
        }
    }
}
