pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::highlight::handlers as highlight;
use crate::profiles::handlers as profiles;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profiles
        .route("/api/v1/search", get(profiles::handle_search))
        .route("/api/v1/cvs/:username", get(profiles::handle_get_cv))
        .route(
            "/api/v1/cvs/:username/annotate",
            post(highlight::handle_annotate),
        )
        // Highlights
        .route("/api/v1/highlights/spans", post(highlight::handle_spans))
        .route(
            "/api/v1/highlights/citations",
            post(highlight::handle_citations),
        )
        .route("/api/v1/highlights/stream", post(highlight::handle_stream))
        .with_state(state)
}
