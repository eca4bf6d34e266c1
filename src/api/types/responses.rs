//! Wire response bodies

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::query::Mood;
use crate::domain::quote::ScoredQuote;
use crate::infrastructure::services::{
    ActorSearch, AttributedQuote, CacheMatchInfo, CacheStatsSummary, MovieSearch, Recommendation,
};

/// A quote as presented to the client. `score` is a string so that
/// model-sourced quotes, which have no similarity basis, can carry
/// `"N/A"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteView {
    pub quote: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    pub movie: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    pub score: String,
}

impl QuoteView {
    fn from_scored(scored: &ScoredQuote) -> Self {
        Self {
            quote: scored.quote.text.clone(),
            character: scored.quote.character.clone(),
            actor: None,
            movie: scored.quote.movie.clone(),
            year: scored.quote.year,
            score: format!("{:.2}", scored.score),
        }
    }

    fn from_attributed(attr: &AttributedQuote, actor: &str) -> Self {
        Self {
            quote: attr.quote.clone(),
            character: Some(attr.character.clone()),
            actor: Some(actor.to_string()),
            movie: attr.movie.clone(),
            year: attr.year,
            score: "N/A".to_string(),
        }
    }
}

/// Cache-hit metadata echoed back on cached responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheMatchView {
    pub original_query: String,
    pub similarity: f32,
    /// Unix milliseconds of the original write
    pub cached_at: u64,
    pub cost_saved: f64,
}

impl From<&CacheMatchInfo> for CacheMatchView {
    fn from(info: &CacheMatchInfo) -> Self {
        Self {
            original_query: info.original_query.clone(),
            similarity: info.similarity,
            cached_at: info.cached_at_ms,
            cost_saved: info.cost_saved,
        }
    }
}

/// Successful response for all three search modes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub success: bool,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<String>,
    pub quotes_found: usize,
    pub available_quotes: Vec<QuoteView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_match: Option<CacheMatchView>,
    pub timestamp: String,
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

impl QuoteResponse {
    pub fn from_recommendation(result: &Recommendation) -> Self {
        let available_quotes: Vec<QuoteView> =
            result.quotes.iter().map(QuoteView::from_scored).collect();

        Self {
            success: true,
            recommendation: result.recommendation.clone(),
            situation: Some(result.situation.clone()),
            mood: Some(result.mood),
            actor: None,
            movie: None,
            quotes_found: available_quotes.len(),
            available_quotes,
            cached: result.cache_match.as_ref().map(|_| true),
            cache_match: result.cache_match.as_ref().map(CacheMatchView::from),
            timestamp: now_rfc3339(),
        }
    }

    pub fn from_actor_search(result: &ActorSearch) -> Self {
        let available_quotes: Vec<QuoteView> = result
            .quotes
            .iter()
            .map(|attr| QuoteView::from_attributed(attr, &result.actor))
            .collect();

        Self {
            success: true,
            recommendation: result.recommendation.clone(),
            situation: None,
            mood: None,
            actor: Some(result.actor.clone()),
            movie: None,
            quotes_found: available_quotes.len(),
            available_quotes,
            cached: None,
            cache_match: None,
            timestamp: now_rfc3339(),
        }
    }

    pub fn from_movie_search(result: &MovieSearch) -> Self {
        let available_quotes: Vec<QuoteView> =
            result.quotes.iter().map(QuoteView::from_scored).collect();

        Self {
            success: true,
            recommendation: result.recommendation.clone(),
            situation: None,
            mood: None,
            actor: None,
            movie: Some(result.movie.clone()),
            quotes_found: available_quotes.len(),
            available_quotes,
            cached: None,
            cache_match: None,
            timestamp: now_rfc3339(),
        }
    }
}

/// Body of `GET /cache-stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub success: bool,
    pub cache_stats: CacheStatsBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsBody {
    pub total_entries: u64,
    pub total_cached_queries: u64,
    /// Total value of all cached responses
    pub potential_savings: f64,
    /// Real money saved by realized cache hits
    pub actual_savings: f64,
    pub cache_hits_count: u64,
    pub average_savings_per_hit: f64,
    /// Share of the potential that has been realized, in percent
    pub efficiency_ratio: f64,
    pub last_updated: String,
}

impl From<&CacheStatsSummary> for CacheStatsResponse {
    fn from(summary: &CacheStatsSummary) -> Self {
        Self {
            success: true,
            cache_stats: CacheStatsBody {
                total_entries: summary.total_entries,
                total_cached_queries: summary.total_cached_queries,
                potential_savings: summary.potential_savings,
                actual_savings: summary.actual_savings,
                cache_hits_count: summary.cache_hits_count,
                average_savings_per_hit: summary.average_savings_per_hit(),
                efficiency_ratio: summary.efficiency_ratio(),
                last_updated: now_rfc3339(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::QuoteRecord;

    fn scored() -> ScoredQuote {
        ScoredQuote {
            quote: QuoteRecord {
                id: "q1".to_string(),
                text: "Why so serious?".to_string(),
                movie: "The Dark Knight".to_string(),
                character: Some("The Joker".to_string()),
                year: Some(2008),
            },
            score: 0.8712,
        }
    }

    #[test]
    fn test_scored_quote_view_formats_score() {
        let view = QuoteView::from_scored(&scored());

        assert_eq!(view.score, "0.87");
        assert_eq!(view.character.as_deref(), Some("The Joker"));
        assert!(view.actor.is_none());
    }

    #[test]
    fn test_attributed_quote_view_has_na_score() {
        let attr = AttributedQuote {
            quote: "I'll be back.".to_string(),
            movie: "The Terminator".to_string(),
            character: "T-800".to_string(),
            year: Some(1984),
        };
        let view = QuoteView::from_attributed(&attr, "Arnold Schwarzenegger");

        assert_eq!(view.score, "N/A");
        assert_eq!(view.actor.as_deref(), Some("Arnold Schwarzenegger"));
    }

    #[test]
    fn test_recommendation_response_shape() {
        let result = Recommendation {
            recommendation: "Use this one".to_string(),
            situation: "a roast battle".to_string(),
            mood: Mood::Funny,
            quotes: vec![scored()],
            cache_match: None,
        };

        let response = QuoteResponse::from_recommendation(&result);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["situation"], "a roast battle");
        assert_eq!(json["mood"], "funny");
        assert_eq!(json["quotesFound"], 1);
        assert_eq!(json["availableQuotes"][0]["quote"], "Why so serious?");
        assert!(json.get("cached").is_none());
        assert!(json.get("cacheMatch").is_none());
    }

    #[test]
    fn test_cached_response_carries_match_metadata() {
        let result = Recommendation {
            recommendation: "Cached one".to_string(),
            situation: "a roast battle".to_string(),
            mood: Mood::Funny,
            quotes: vec![],
            cache_match: Some(CacheMatchInfo {
                original_query: "a roast fight".to_string(),
                similarity: 0.97,
                cached_at_ms: 1_700_000_000_000,
                cost_saved: 0.0031,
            }),
        };

        let json = serde_json::to_value(QuoteResponse::from_recommendation(&result)).unwrap();

        assert_eq!(json["cached"], true);
        assert_eq!(json["cacheMatch"]["originalQuery"], "a roast fight");
        assert_eq!(json["cacheMatch"]["cachedAt"], 1_700_000_000_000_u64);
    }

    #[test]
    fn test_cache_stats_response_shape() {
        let summary = CacheStatsSummary {
            total_entries: 10,
            total_cached_queries: 4,
            potential_savings: 0.04,
            actual_savings: 0.004,
            cache_hits_count: 2,
        };

        let json = serde_json::to_value(CacheStatsResponse::from(&summary)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["cacheStats"]["totalCachedQueries"], 4);
        assert_eq!(json["cacheStats"]["cacheHitsCount"], 2);
        assert!((json["cacheStats"]["averageSavingsPerHit"].as_f64().unwrap() - 0.002).abs() < 1e-9);
        assert!((json["cacheStats"]["efficiencyRatio"].as_f64().unwrap() - 10.0).abs() < 1e-6);
    }
}
