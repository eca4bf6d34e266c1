/// Policy governing semantic cache hits.
///
/// The default is the strict, mood-aware configuration: a candidate is a
/// hit only when its similarity clears the threshold and its stored mood
/// tag exactly equals the requested mood. The mood-blind 0.85 variant is
/// intentionally not the default; it can return responses whose echoed
/// mood contradicts the request.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    /// Minimum similarity for a cache hit
    pub similarity_threshold: f32,
    /// Queries shorter than this skip the cache entirely
    pub min_query_length: usize,
    /// Require an exact mood-tag match in addition to the threshold
    pub match_mood: bool,
    /// Nearest neighbors to consider per lookup
    pub top_k: usize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.95,
            min_query_length: 10,
            match_mood: true,
            top_k: 3,
        }
    }
}

impl CachePolicy {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }
}
