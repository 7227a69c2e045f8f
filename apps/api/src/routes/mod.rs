pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route(
            "/api/v1/recommendations/jobs",
            post(handlers::handle_recommend_jobs),
        )
        .route(
            "/api/v1/recommendations/resumes",
            post(handlers::handle_recommend_resumes),
        )
        .route("/api/v1/matches/score", post(handlers::handle_score_match))
        .with_state(state)
}
