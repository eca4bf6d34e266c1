//! Search endpoint handlers

use axum::extract::State;
use tracing::info;

use super::state::AppState;
use super::types::{ActorRequest, ApiError, Json, MovieRequest, QuoteRequest, QuoteResponse};
use crate::domain::query::Mood;

/// POST /movie-quotes
///
/// Situation search: classify, check the semantic cache, search the
/// quote index, score, synthesize.
pub async fn recommend_quotes(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let query = request
        .natural_language_query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            ApiError::bad_request("Please describe the situation where you need a movie quote")
        })?;

    // An unrecognized mood label falls back to detection from the query.
    let mood: Option<Mood> = request.mood.as_deref().and_then(|m| m.parse().ok());

    info!(query = %query, "Movie quote request");

    let result = state.recommendations.recommend(query, mood).await?;
    Ok(Json(QuoteResponse::from_recommendation(&result)))
}

/// POST /search-by-actor
pub async fn search_by_actor(
    State(state): State<AppState>,
    Json(request): Json<ActorRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let actor = request
        .actor_name
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::bad_request("Please provide an actor name to search for"))?;

    info!(actor = %actor, "Actor search request");

    let result = state.recommendations.search_by_actor(actor).await?;
    Ok(Json(QuoteResponse::from_actor_search(&result)))
}

/// POST /search-by-movie
pub async fn search_by_movie(
    State(state): State<AppState>,
    Json(request): Json<MovieRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let title = request
        .movie_title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("Please provide a movie title to search for"))?;

    info!(movie = %title, "Movie search request");

    let result = state.recommendations.search_by_movie(title).await?;
    Ok(Json(QuoteResponse::from_movie_search(&result)))
}
