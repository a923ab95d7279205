pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/extract-job", post(handlers::handle_extract_job))
        .route("/api/tailor-resume", post(handlers::handle_tailor_resume))
        .with_state(state)
}
