//! Semantic cache: similarity lookup against the cache namespace,
//! write-back of synthesized responses and savings accounting.
//!
//! Lookup and write failures are logged and swallowed; the cache can
//! only ever skip itself, never fail a request.

use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::cache::{
    cost, CacheHit, CacheLookup, CachePolicy, CacheSkip, CachedResponse, PendingWrite,
    SavingsEvent, RECORD_TYPE_RESPONSE, RECORD_TYPE_SAVINGS,
};
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::query::Mood;
use crate::domain::quote::ScoredQuote;
use crate::domain::vector::{VectorQuery, VectorRecord, VectorStore};
use crate::domain::DomainError;

/// Result count for the statistics bulk scan
const STATS_SCAN_TOP_K: usize = 10_000;

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Aggregated figures for the cache-stats endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStatsSummary {
    /// Vectors in the backing index, all namespaces
    pub total_entries: u64,
    /// `cached_response` entries found in the scan
    pub total_cached_queries: u64,
    /// Sum of estimated costs over cached responses
    pub potential_savings: f64,
    /// Sum of realized savings over hit events
    pub actual_savings: f64,
    /// `actual_savings` events found in the scan
    pub cache_hits_count: u64,
}

impl CacheStatsSummary {
    pub fn average_savings_per_hit(&self) -> f64 {
        if self.cache_hits_count == 0 {
            return 0.0;
        }
        self.actual_savings / self.cache_hits_count as f64
    }

    /// Share of the potential savings that has been realized, in percent
    pub fn efficiency_ratio(&self) -> f64 {
        if self.potential_savings <= 0.0 {
            return 0.0;
        }
        self.actual_savings / self.potential_savings * 100.0
    }
}

/// Semantic cache over a vector-store namespace.
#[derive(Debug)]
pub struct SemanticCacheService {
    embeddings: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    policy: CachePolicy,
    namespace: String,
    chat_model: String,
}

impl SemanticCacheService {
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        policy: CachePolicy,
        namespace: impl Into<String>,
        chat_model: impl Into<String>,
    ) -> Self {
        Self {
            embeddings,
            store,
            policy,
            namespace: namespace.into(),
            chat_model: chat_model.into(),
        }
    }

    /// Text embedded for cache matching. With mood matching enabled the
    /// mood is appended as a disambiguating suffix so that the same
    /// wording with different moods lands on different vectors.
    fn cache_key(&self, query: &str, mood: Mood) -> String {
        if self.policy.match_mood {
            format!("{query} | mood:{mood}")
        } else {
            query.to_string()
        }
    }

    /// Check the cache for a previously synthesized response.
    pub async fn lookup(&self, query: &str, mood: Mood) -> CacheLookup {
        let query = query.trim();

        if query.is_empty() {
            return CacheLookup::Skipped(CacheSkip::NoQuery);
        }

        if query.chars().count() < self.policy.min_query_length {
            debug!("Query too short for cache, skipping");
            return CacheLookup::Skipped(CacheSkip::TooShort);
        }

        let embedding = match self.embeddings.embed(&self.cache_key(query, mood)).await {
            Ok(embedding) => embedding.into_vector(),
            Err(e) => {
                warn!(error = %e, "Cache embedding failed, continuing without cache");
                return CacheLookup::Skipped(CacheSkip::LookupFailed);
            }
        };

        let vector_query =
            VectorQuery::new(embedding.clone(), self.policy.top_k, &self.namespace);
        let matches = match self.store.query(&vector_query).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!(error = %e, "Cache lookup failed, continuing without cache");
                return CacheLookup::Skipped(CacheSkip::LookupFailed);
            }
        };

        for candidate in matches {
            if candidate.score < self.policy.similarity_threshold {
                continue;
            }

            let Some(cached) = CachedResponse::from_metadata(&candidate.metadata) else {
                continue;
            };

            if self.policy.match_mood && cached.mood != mood {
                debug!(
                    candidate_mood = %cached.mood,
                    requested_mood = %mood,
                    "Cache candidate rejected on mood mismatch"
                );
                continue;
            }

            info!(similarity = candidate.score, "Cache hit");
            return CacheLookup::Hit(Box::new(CacheHit {
                response: cached,
                similarity: candidate.score,
                embedding,
                query: query.to_string(),
            }));
        }

        debug!("Cache miss");
        CacheLookup::Miss(PendingWrite {
            embedding,
            query: query.to_string(),
            mood,
        })
    }

    /// Store a freshly synthesized response under the miss embedding.
    pub async fn write_back(
        &self,
        pending: &PendingWrite,
        response: &str,
        quotes: &[ScoredQuote],
    ) -> Result<(), DomainError> {
        if response.is_empty() {
            debug!("Empty response, not caching");
            return Ok(());
        }

        let estimated_cost = cost::estimate_chat_cost(&self.chat_model, &pending.query, response)
            + cost::estimate_embedding_cost(self.embeddings.model(), &pending.query);

        let entry = CachedResponse {
            original_query: pending.query.clone(),
            response: response.to_string(),
            mood: pending.mood,
            quotes: quotes.to_vec(),
            cached_at_ms: now_ms(),
            estimated_cost,
        };

        let record = VectorRecord::new(
            format!("{}-{}", RECORD_TYPE_RESPONSE, Uuid::new_v4()),
            pending.embedding.clone(),
            entry.to_metadata(),
        );

        self.store.upsert(&self.namespace, vec![record]).await?;
        info!(query = %pending.query, "Response saved to semantic cache");

        Ok(())
    }

    /// Log a realized hit so the stats endpoint can report actual
    /// savings.
    pub async fn record_savings(&self, hit: &CacheHit) -> Result<(), DomainError> {
        let event = SavingsEvent {
            original_query: hit.query.clone(),
            cost_saved: hit.response.estimated_cost,
            saved_at_ms: now_ms(),
        };

        let record = VectorRecord::new(
            format!("{}-{}", RECORD_TYPE_SAVINGS, Uuid::new_v4()),
            hit.embedding.clone(),
            event.to_metadata(),
        );

        self.store.upsert(&self.namespace, vec![record]).await?;

        Ok(())
    }

    /// Bulk-scan the cache namespace and aggregate savings figures.
    ///
    /// The scan is a nearest-neighbor query with a dummy vector and a
    /// very large result count; the store has no listing endpoint.
    pub async fn stats(&self) -> Result<CacheStatsSummary, DomainError> {
        let index_stats = self.store.stats().await?;

        let dummy = vec![0.01_f32; self.embeddings.dimensions()];
        let entries = self
            .store
            .query(&VectorQuery::new(dummy, STATS_SCAN_TOP_K, &self.namespace))
            .await?;

        let mut summary = CacheStatsSummary {
            total_entries: index_stats.total_vectors,
            ..Default::default()
        };

        for entry in entries {
            let record_type = entry.metadata.get("type").and_then(|v| v.as_str());

            if record_type == Some(RECORD_TYPE_SAVINGS) {
                summary.cache_hits_count += 1;
                summary.actual_savings += entry
                    .metadata
                    .get("costSaved")
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0);
            } else if record_type == Some(RECORD_TYPE_RESPONSE)
                || entry.metadata.get("estimatedCost").is_some()
            {
                summary.total_cached_queries += 1;
                summary.potential_savings += entry
                    .metadata
                    .get("estimatedCost")
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0);
            }
        }

        Ok(summary)
    }
}
