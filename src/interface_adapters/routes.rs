use crate::interface_adapters::handlers::{
    animated_game, ascii_frame, gif_frame, healthz, index,
};
use crate::interface_adapters::state::AppState;
use axum::{Router, routing::get};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    // Wire the HTTP routes to their handlers.
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/games/{game_id}/frames/{frame}/ascii", get(ascii_frame))
        .route("/games/{game_id}/frames/{frame}/gif", get(gif_frame))
        .route("/games/{game_id}/gif", get(animated_game))
        .with_state(state)
}
