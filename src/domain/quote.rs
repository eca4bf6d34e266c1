//! Quote records retrieved from the vector index

use serde::{Deserialize, Serialize};

use crate::domain::vector::VectorMatch;

/// A movie quote as stored in the vector index metadata.
///
/// Immutable once retrieved; the seeding pipeline stores `text`, `movie`
/// and `year` for every vector, `character` only where known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: String,
    pub text: String,
    pub movie: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
}

impl QuoteRecord {
    /// Decode a quote from a vector search match. Returns `None` when the
    /// metadata has no quote text, which indicates a foreign record.
    pub fn from_match(m: &VectorMatch) -> Option<Self> {
        let metadata = &m.metadata;
        let text = metadata
            .get("text")
            .or_else(|| metadata.get("quote"))
            .and_then(|v| v.as_str())?
            .to_string();

        let movie = metadata
            .get("movie")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown")
            .to_string();

        let character = metadata
            .get("character")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        // Seed data carries the year as either a number or a CSV string.
        let year = metadata.get("year").and_then(|v| {
            v.as_u64()
                .map(|y| y as u32)
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        });

        Some(Self {
            id: m.id.clone(),
            text,
            movie,
            character,
            year,
        })
    }
}

/// A quote together with its adjusted relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredQuote {
    pub quote: QuoteRecord,
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quote_match(metadata: serde_json::Value) -> VectorMatch {
        VectorMatch {
            id: "quote-1".to_string(),
            score: 0.8,
            metadata,
        }
    }

    #[test]
    fn test_from_match_with_full_metadata() {
        let m = quote_match(json!({
            "text": "You can't handle the truth!",
            "movie": "A Few Good Men",
            "character": "Col. Jessup",
            "year": 1992
        }));

        let quote = QuoteRecord::from_match(&m).unwrap();
        assert_eq!(quote.text, "You can't handle the truth!");
        assert_eq!(quote.movie, "A Few Good Men");
        assert_eq!(quote.character.as_deref(), Some("Col. Jessup"));
        assert_eq!(quote.year, Some(1992));
    }

    #[test]
    fn test_from_match_with_string_year() {
        let m = quote_match(json!({
            "text": "Here's looking at you, kid.",
            "movie": "Casablanca",
            "year": "1942"
        }));

        let quote = QuoteRecord::from_match(&m).unwrap();
        assert_eq!(quote.year, Some(1942));
        assert!(quote.character.is_none());
    }

    #[test]
    fn test_from_match_without_text_is_rejected() {
        let m = quote_match(json!({ "movie": "Casablanca" }));
        assert!(QuoteRecord::from_match(&m).is_none());
    }

    #[test]
    fn test_from_match_missing_movie_defaults_to_unknown() {
        let m = quote_match(json!({ "text": "I'll be back." }));

        let quote = QuoteRecord::from_match(&m).unwrap();
        assert_eq!(quote.movie, "Unknown");
        assert_eq!(quote.year, None);
    }
}
