//! Route table.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handler, state::AppState};

/// Build the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/participants",
            post(handler::register_participant).get(handler::list_participants),
        )
        .route(
            "/messages",
            post(handler::post_message).get(handler::list_messages),
        )
        .route("/status", post(handler::heartbeat))
        .route("/health", get(handler::health_check))
        .route("/debug/state", get(handler::debug_state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
