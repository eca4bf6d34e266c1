//! Liveness endpoint

use axum::{http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::Serialize;

use super::types::Json;

#[derive(Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub version: String,
    pub timestamp: String,
}

/// GET /health - liveness probe, no business logic
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        service: "reelquote",
        status: "healthy",
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(response))
}
