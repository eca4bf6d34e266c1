//! API layer - HTTP endpoints and routing

pub mod health;
pub mod quotes;
pub mod state;
pub mod stats;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/movie-quotes", post(quotes::recommend_quotes))
        .route("/search-by-actor", post(quotes::search_by_actor))
        .route("/search-by-movie", post(quotes::search_by_movie))
        .route("/cache-stats", get(stats::cache_stats))
        .route("/health", get(health::health_check))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
