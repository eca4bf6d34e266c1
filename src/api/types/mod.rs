//! Wire types for the HTTP surface

mod error;
mod json;
mod requests;
mod responses;

pub use error::{ApiError, ApiErrorBody, ApiErrorMessage};
pub use json::Json;
pub use requests::{ActorRequest, MovieRequest, QuoteRequest};
pub use responses::{CacheStatsBody, CacheStatsResponse, CacheMatchView, QuoteResponse, QuoteView};
