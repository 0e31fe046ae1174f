pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ranking::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/rankings", post(handlers::handle_create_ranking))
        .route(
            "/api/v1/rankings/export",
            get(handlers::handle_download_export),
        )
        .route(
            "/api/v1/resumes/:filename",
            get(handlers::handle_view_resume),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
