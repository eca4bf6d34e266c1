//! Cache record codecs and per-request lookup outcomes.
//!
//! Two record kinds share the cache namespace, discriminated by the
//! `type` metadata field: `cached_response` entries hold reusable
//! synthesized responses, `actual_savings` entries log realized cache
//! hits for the statistics endpoint.

use serde_json::json;

use crate::domain::query::Mood;
use crate::domain::quote::ScoredQuote;

pub const RECORD_TYPE_RESPONSE: &str = "cached_response";
pub const RECORD_TYPE_SAVINGS: &str = "actual_savings";

/// A reusable synthesized response, as stored in cache metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    pub original_query: String,
    pub response: String,
    pub mood: Mood,
    pub quotes: Vec<ScoredQuote>,
    /// Unix milliseconds at write time
    pub cached_at_ms: u64,
    /// Estimated cost of the calls this entry can save
    pub estimated_cost: f64,
}

impl CachedResponse {
    pub fn to_metadata(&self) -> serde_json::Value {
        json!({
            "type": RECORD_TYPE_RESPONSE,
            "originalQuery": self.original_query,
            "llmResponse": self.response,
            "mood": self.mood.as_str(),
            "quoteCount": self.quotes.len(),
            "quotes": serde_json::to_string(&self.quotes).unwrap_or_else(|_| "[]".to_string()),
            "timestamp": self.cached_at_ms,
            "estimatedCost": self.estimated_cost,
        })
    }

    /// Decode a cache entry. Returns `None` for savings events and for
    /// records missing the response text; the quote list is best-effort.
    pub fn from_metadata(metadata: &serde_json::Value) -> Option<Self> {
        if metadata.get("type").and_then(|v| v.as_str()) != Some(RECORD_TYPE_RESPONSE) {
            return None;
        }

        let response = metadata.get("llmResponse")?.as_str()?.to_string();
        let original_query = metadata
            .get("originalQuery")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let mood = metadata
            .get("mood")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let quotes = metadata
            .get("quotes")
            .and_then(|v| v.as_str())
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default();
        let cached_at_ms = metadata
            .get("timestamp")
            .and_then(|v| v.as_u64())
            .unwrap_or_default();
        let estimated_cost = metadata
            .get("estimatedCost")
            .and_then(|v| v.as_f64())
            .unwrap_or_default();

        Some(Self {
            original_query,
            response,
            mood,
            quotes,
            cached_at_ms,
            estimated_cost,
        })
    }
}

/// A realized cache hit, written so the statistics endpoint can report
/// actual (not just potential) savings.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsEvent {
    pub original_query: String,
    pub cost_saved: f64,
    pub saved_at_ms: u64,
}

impl SavingsEvent {
    pub fn to_metadata(&self) -> serde_json::Value {
        json!({
            "type": RECORD_TYPE_SAVINGS,
            "originalQuery": self.original_query,
            "costSaved": self.cost_saved,
            "timestamp": self.saved_at_ms,
        })
    }
}

/// Why the cache stage did not perform a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSkip {
    /// No cacheable input on the request
    NoQuery,
    /// Query shorter than the policy minimum
    TooShort,
    /// Backing store not configured or disabled
    Unavailable,
    /// Lookup failed; logged upstream, pipeline continues without
    /// write-back state
    LookupFailed,
}

/// A cache hit: the stored response plus the match context needed to
/// report and record the savings event.
#[derive(Debug, Clone)]
pub struct CacheHit {
    pub response: CachedResponse,
    pub similarity: f32,
    /// Embedding of the current query, reused for the savings record
    pub embedding: Vec<f32>,
    pub query: String,
}

/// Request-scoped state retained after a miss, consumed by write-back.
#[derive(Debug, Clone)]
pub struct PendingWrite {
    pub embedding: Vec<f32>,
    pub query: String,
    pub mood: Mood,
}

/// Outcome of the per-request cache stage.
#[derive(Debug, Clone)]
pub enum CacheLookup {
    Skipped(CacheSkip),
    Hit(Box<CacheHit>),
    Miss(PendingWrite),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::QuoteRecord;

    fn sample_response() -> CachedResponse {
        CachedResponse {
            original_query: "need a comeback for my friend".to_string(),
            response: "**Perfect Quote:** ...".to_string(),
            mood: Mood::Sassy,
            quotes: vec![ScoredQuote {
                quote: QuoteRecord {
                    id: "q1".to_string(),
                    text: "Frankly, my dear...".to_string(),
                    movie: "Gone with the Wind".to_string(),
                    character: Some("Rhett Butler".to_string()),
                    year: Some(1939),
                },
                score: 0.91,
            }],
            cached_at_ms: 1_700_000_000_000,
            estimated_cost: 0.00275,
        }
    }

    #[test]
    fn test_metadata_round_trip() {
        let original = sample_response();
        let metadata = original.to_metadata();

        assert_eq!(metadata["type"], RECORD_TYPE_RESPONSE);
        assert_eq!(metadata["quoteCount"], 1);

        let decoded = CachedResponse::from_metadata(&metadata).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_savings_event_is_not_a_response() {
        let event = SavingsEvent {
            original_query: "q".to_string(),
            cost_saved: 0.001,
            saved_at_ms: 1,
        };

        assert!(CachedResponse::from_metadata(&event.to_metadata()).is_none());
    }

    #[test]
    fn test_from_metadata_tolerates_corrupt_quote_list() {
        let mut metadata = sample_response().to_metadata();
        metadata["quotes"] = serde_json::Value::String("not json".to_string());

        let decoded = CachedResponse::from_metadata(&metadata).unwrap();
        assert!(decoded.quotes.is_empty());
    }

    #[test]
    fn test_from_metadata_requires_response_text() {
        let mut metadata = sample_response().to_metadata();
        metadata.as_object_mut().unwrap().remove("llmResponse");

        assert!(CachedResponse::from_metadata(&metadata).is_none());
    }
}
