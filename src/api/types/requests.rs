//! Wire request bodies.
//!
//! Required fields are deserialized as options so the handlers can
//! answer missing input with the service's 400 error shape instead of a
//! deserializer rejection.

use serde::Deserialize;

/// Body of `POST /movie-quotes`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub natural_language_query: Option<String>,
    pub mood: Option<String>,
}

/// Body of `POST /search-by-actor`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRequest {
    pub actor_name: Option<String>,
}

/// Body of `POST /search-by-movie`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRequest {
    pub movie_title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_request_field_names() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{ "naturalLanguageQuery": "I need a comeback", "mood": "sassy" }"#,
        )
        .unwrap();

        assert_eq!(request.natural_language_query.as_deref(), Some("I need a comeback"));
        assert_eq!(request.mood.as_deref(), Some("sassy"));
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let request: QuoteRequest = serde_json::from_str("{}").unwrap();
        assert!(request.natural_language_query.is_none());

        let request: ActorRequest = serde_json::from_str("{}").unwrap();
        assert!(request.actor_name.is_none());

        let request: MovieRequest = serde_json::from_str("{}").unwrap();
        assert!(request.movie_title.is_none());
    }
}
