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
            "/api/v1/matching/calculate",
            post(handlers::handle_calculate),
        )
        .route(
            "/api/v1/matching/candidates",
            get(handlers::handle_top_candidates),
        )
        .route(
            "/api/v1/matching/recommendations",
            get(handlers::handle_recommendations),
        )
        .with_state(state)
}
