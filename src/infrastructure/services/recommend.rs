//! Request pipeline for the three search modes.
//!
//! Stages run strictly sequentially per request; the only spawned work
//! is cache write-back and savings recording, which never block or fail
//! the response that triggered them.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::cache::SemanticCacheService;
use super::synthesis::{AttributedQuote, ResponseSynthesizer};
use crate::domain::cache::CacheLookup;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::query::{classify, Mood};
use crate::domain::quote::{QuoteRecord, ScoredQuote};
use crate::domain::scoring;
use crate::domain::vector::{VectorQuery, VectorStore};
use crate::domain::DomainError;

/// Candidates fetched from the index before scoring
const SEARCH_TOP_K: usize = 10;

/// Cache-hit details echoed back to the client.
#[derive(Debug, Clone)]
pub struct CacheMatchInfo {
    pub original_query: String,
    pub similarity: f32,
    pub cached_at_ms: u64,
    pub cost_saved: f64,
}

/// Result of a situation search.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub recommendation: String,
    pub situation: String,
    pub mood: Mood,
    pub quotes: Vec<ScoredQuote>,
    /// Present iff the response came entirely from the cache
    pub cache_match: Option<CacheMatchInfo>,
}

/// Result of an actor search. Quotes are model-sourced, so they carry no
/// similarity score.
#[derive(Debug, Clone)]
pub struct ActorSearch {
    pub recommendation: String,
    pub actor: String,
    pub quotes: Vec<AttributedQuote>,
}

/// Result of a movie-title search.
#[derive(Debug, Clone)]
pub struct MovieSearch {
    pub recommendation: String,
    pub movie: String,
    pub quotes: Vec<ScoredQuote>,
}

/// Orchestrates classification, caching, search, scoring and synthesis.
pub struct RecommendationService {
    embeddings: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    synthesizer: ResponseSynthesizer,
    cache: Option<Arc<SemanticCacheService>>,
    quotes_namespace: String,
}

impl RecommendationService {
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        synthesizer: ResponseSynthesizer,
        cache: Option<Arc<SemanticCacheService>>,
        quotes_namespace: impl Into<String>,
    ) -> Self {
        Self {
            embeddings,
            store,
            synthesizer,
            cache,
            quotes_namespace: quotes_namespace.into(),
        }
    }

    /// Recommend quotes for a described social situation.
    pub async fn recommend(
        &self,
        query: &str,
        mood_override: Option<Mood>,
    ) -> Result<Recommendation, DomainError> {
        let ctx = classify(query, mood_override);
        debug!(situations = ?ctx.situation_labels(), mood = %ctx.mood, "Query classified");

        let mut pending = None;
        if let Some(cache) = &self.cache {
            match cache.lookup(&ctx.original_query, ctx.mood).await {
                CacheLookup::Hit(hit) => {
                    info!(similarity = hit.similarity, "Returning cached recommendation");

                    let cache = Arc::clone(cache);
                    let savings_hit = (*hit).clone();
                    tokio::spawn(async move {
                        if let Err(e) = cache.record_savings(&savings_hit).await {
                            warn!(error = %e, "Failed to record cache savings");
                        }
                    });

                    return Ok(Recommendation {
                        recommendation: hit.response.response.clone(),
                        situation: ctx.original_query,
                        mood: hit.response.mood,
                        quotes: hit.response.quotes.clone(),
                        cache_match: Some(CacheMatchInfo {
                            original_query: hit.response.original_query.clone(),
                            similarity: hit.similarity,
                            cached_at_ms: hit.response.cached_at_ms,
                            cost_saved: hit.response.estimated_cost,
                        }),
                    });
                }
                CacheLookup::Miss(p) => pending = Some(p),
                CacheLookup::Skipped(reason) => {
                    debug!(?reason, "Cache stage skipped");
                }
            }
        }

        let embedding = self.embeddings.embed(&ctx.original_query).await?;
        let matches = self
            .store
            .query(&VectorQuery::new(
                embedding.into_vector(),
                SEARCH_TOP_K,
                &self.quotes_namespace,
            ))
            .await?;

        if matches.is_empty() {
            return Err(DomainError::not_found(
                "No matching quotes found for your situation",
            ));
        }

        let candidates: Vec<(QuoteRecord, f32)> = matches
            .iter()
            .filter_map(|m| QuoteRecord::from_match(m).map(|q| (q, m.score)))
            .collect();
        let ranked = scoring::rank_quotes(candidates, &ctx);
        debug!(candidates = matches.len(), ranked = ranked.len(), "Quotes scored");

        let recommendation = self
            .synthesizer
            .recommend_for_situation(&ctx, &ranked)
            .await?;

        if let (Some(cache), Some(pending)) = (&self.cache, pending) {
            if !recommendation.is_empty() {
                let cache = Arc::clone(cache);
                let response = recommendation.clone();
                let quotes = ranked.clone();
                tokio::spawn(async move {
                    if let Err(e) = cache.write_back(&pending, &response, &quotes).await {
                        warn!(error = %e, "Cache write-back failed");
                    }
                });
            }
        }

        Ok(Recommendation {
            recommendation,
            situation: ctx.original_query,
            mood: ctx.mood,
            quotes: ranked,
            cache_match: None,
        })
    }

    /// Find famous quotes delivered by an actor. These come from the
    /// model's knowledge, not the quote index.
    pub async fn search_by_actor(&self, actor: &str) -> Result<ActorSearch, DomainError> {
        let recommendation = self.synthesizer.recommend_for_actor(actor).await?;
        let quotes = self
            .synthesizer
            .attribute_quotes(&recommendation, actor)
            .await;

        Ok(ActorSearch {
            recommendation,
            actor: actor.to_string(),
            quotes,
        })
    }

    /// Find indexed quotes for a movie title. Zero index matches is a
    /// success with guidance text, not an error.
    pub async fn search_by_movie(&self, title: &str) -> Result<MovieSearch, DomainError> {
        let embedding = self.embeddings.embed(title).await?;
        let matches = self
            .store
            .query(
                &VectorQuery::new(
                    embedding.into_vector(),
                    SEARCH_TOP_K,
                    &self.quotes_namespace,
                )
                .with_eq_filter("movie", title),
            )
            .await?;

        if matches.is_empty() {
            info!(movie = title, "No indexed quotes for movie");
            return Ok(MovieSearch {
                recommendation: format!(
                    "No quotes from \"{title}\" in our collection yet. Try another movie \
                     title, or describe the situation you need a quote for and we'll find \
                     something that fits."
                ),
                movie: title.to_string(),
                quotes: Vec::new(),
            });
        }

        let mut quotes: Vec<ScoredQuote> = matches
            .iter()
            .filter_map(|m| {
                QuoteRecord::from_match(m).map(|quote| ScoredQuote {
                    quote,
                    score: m.score,
                })
            })
            .collect();

        let recommendation = self.synthesizer.recommend_for_movie(title, &quotes).await?;

        let attributed = self
            .synthesizer
            .attribute_quotes(&recommendation, title)
            .await;
        fill_characters(&mut quotes, &attributed);

        Ok(MovieSearch {
            recommendation,
            movie: title.to_string(),
            quotes,
        })
    }
}

/// Copy character names from attribution results onto index quotes that
/// lack one, matched by quote-text overlap.
fn fill_characters(quotes: &mut [ScoredQuote], attributed: &[AttributedQuote]) {
    for scored in quotes.iter_mut() {
        if scored.quote.character.is_some() {
            continue;
        }

        let text = scored.quote.text.to_lowercase();
        let found = attributed.iter().find(|attr| {
            let attr_text = attr.quote.to_lowercase();
            !attr_text.is_empty() && (text.contains(&attr_text) || attr_text.contains(&text))
        });

        if let Some(attr) = found {
            if attr.character != "Unknown" {
                scored.quote.character = Some(attr.character.clone());
            }
        }
    }
}
