//! Cache statistics endpoint

use axum::extract::State;

use super::state::AppState;
use super::types::{ApiError, CacheStatsResponse, Json};

/// GET /cache-stats
///
/// Bulk-scans the cache namespace and reports potential versus realized
/// savings. 503 when the semantic cache is not configured.
pub async fn cache_stats(State(state): State<AppState>) -> Result<Json<CacheStatsResponse>, ApiError> {
    let cache = state
        .cache
        .as_ref()
        .ok_or_else(|| ApiError::unavailable("Cache not available"))?;

    let summary = cache.stats().await.map_err(ApiError::from)?;

    Ok(Json(CacheStatsResponse::from(&summary)))
}
