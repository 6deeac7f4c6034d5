use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, merge, middleware};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config().limits.max_body_bytes;

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Batch merge
        .route("/merge/batch", post(merge::merge_batch))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(axum::middleware::from_fn(middleware::track_metrics))
        .layer(TraceLayer::new_for_http())
}
