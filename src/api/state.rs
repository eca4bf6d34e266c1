//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::{RecommendationService, SemanticCacheService};

/// Shared state injected into every handler. Services are constructed
/// once at startup; there are no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub recommendations: Arc<RecommendationService>,
    /// `None` when the semantic cache is disabled or unconfigured
    pub cache: Option<Arc<SemanticCacheService>>,
}

impl AppState {
    pub fn new(
        recommendations: Arc<RecommendationService>,
        cache: Option<Arc<SemanticCacheService>>,
    ) -> Self {
        Self {
            recommendations,
            cache,
        }
    }
}
