//! Router composition.
//!
//! `/health` is the only HTTP route; every other path is handed to the
//! WebSocket upgrade handler, so clients may connect on any path.

pub mod handlers;

use axum::Router;
use axum::routing::get;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the complete router: system routes plus the catch-all upgrade.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(handlers::system::routes())
        .route("/", get(ws_handler))
        .fallback(ws_handler)
}
