//! Composed services built on the provider traits

mod cache;
mod recommend;
mod synthesis;

pub use cache::{CacheStatsSummary, SemanticCacheService};
pub use recommend::{
    ActorSearch, CacheMatchInfo, MovieSearch, Recommendation, RecommendationService,
};
pub use synthesis::{extract_json_array, AttributedQuote, ResponseSynthesizer};
