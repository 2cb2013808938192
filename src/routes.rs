use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use crate::AppState;
use crate::handlers;

/// Build the application router around the shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/metrics",
            get(handlers::user_metrics).fallback(handlers::method_not_allowed),
        )
        .layer(Extension(state))
}
