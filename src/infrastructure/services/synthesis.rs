//! Response synthesis: prompt construction, chat-completion calls and
//! best-effort attribution parsing.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::llm::{ChatProvider, ChatRequest};
use crate::domain::query::QueryContext;
use crate::domain::quote::ScoredQuote;
use crate::domain::DomainError;

const SYSTEM_PROMPT: &str = "You are a fun movie quote expert who helps people find perfect \
     quotes for their conversations. Be casual, helpful, and enthusiastic!";

// Higher temperature for the creative recommendation task, lower for
// fact lookup and attribution.
const RECOMMEND_TEMPERATURE: f32 = 0.6;
const LOOKUP_TEMPERATURE: f32 = 0.3;

const RECOMMEND_MAX_TOKENS: u32 = 500;
const ATTRIBUTION_MAX_TOKENS: u32 = 400;

/// A quote attributed to a movie and character by the model.
///
/// Every field the model omits falls back to "Unknown"; attribution is
/// an enrichment step and must never fail a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributedQuote {
    #[serde(default)]
    pub quote: String,
    #[serde(default = "unknown")]
    pub movie: String,
    #[serde(default = "unknown")]
    pub character: String,
    #[serde(default)]
    pub year: Option<u32>,
}

fn unknown() -> String {
    "Unknown".to_string()
}

static JSON_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("invalid json array pattern"));
static JSON_ARRAY_LAZY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*?\]").expect("invalid json array pattern"));

/// Extract the first bracketed JSON array from freeform model text.
///
/// Tries the widest bracket span first (covers arrays of objects that
/// themselves contain brackets), then the narrowest, and gives up with
/// `None` rather than erroring.
pub fn extract_json_array(text: &str) -> Option<serde_json::Value> {
    for regex in [&*JSON_ARRAY, &*JSON_ARRAY_LAZY] {
        if let Some(m) = regex.find(text) {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(m.as_str()) {
                if value.is_array() {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// Builds prompts and requests chat completions for the three search
/// modes.
#[derive(Debug, Clone)]
pub struct ResponseSynthesizer {
    chat: Arc<dyn ChatProvider>,
    model: String,
}

impl ResponseSynthesizer {
    pub fn new(chat: Arc<dyn ChatProvider>, model: impl Into<String>) -> Self {
        Self {
            chat,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Numbered context block listing the retrieved quotes
    fn quote_context(quotes: &[ScoredQuote]) -> String {
        if quotes.is_empty() {
            return "No specific movie quotes found in database.".to_string();
        }

        let mut parts = vec!["MATCHING MOVIE QUOTES:".to_string()];
        for (index, scored) in quotes.iter().enumerate() {
            let quote = &scored.quote;
            parts.push(format!("\n{}. \"{}\"", index + 1, quote.text));
            parts.push(format!(
                "   - {} from {} ({})",
                quote.character.as_deref().unwrap_or("Unknown"),
                quote.movie,
                quote.year.map_or("year unknown".to_string(), |y| y.to_string()),
            ));
        }

        parts.join("\n")
    }

    fn situation_prompt(ctx: &QueryContext, context: &str) -> String {
        format!(
            "You are a movie quote expert helping someone find the perfect quote for their situation.\n\
             \n\
             THEIR SITUATION: {situation}\n\
             PREFERRED MOOD: {mood}\n\
             \n\
             {context}\n\
             \n\
             INSTRUCTIONS:\n\
             1. Pick the 1-3 BEST quotes from the provided options that fit their situation\n\
             2. Explain WHY each quote works perfectly for their situation\n\
             3. Give a quick tip on HOW to deliver it (timing, tone, etc.)\n\
             4. Keep it conversational and fun - this is about using quotes in real conversations!\n\
             \n\
             FORMAT:\n\
             **Perfect Quote for Your Situation:**\n\
             \"[Quote]\" - [Character] from [Movie]\n\
             \n\
             **Why this works:** [Brief explanation of why it fits]\n\
             **How to use it:** [Quick delivery tip]\n\
             \n\
             [If there are more good options, repeat the format]\n\
             \n\
             Keep it short, practical, and fun!",
            situation = ctx.original_query,
            mood = ctx.mood,
        )
    }

    /// Synthesize a recommendation for a described situation.
    pub async fn recommend_for_situation(
        &self,
        ctx: &QueryContext,
        quotes: &[ScoredQuote],
    ) -> Result<String, DomainError> {
        let prompt = Self::situation_prompt(ctx, &Self::quote_context(quotes));

        let request = ChatRequest::builder()
            .system(SYSTEM_PROMPT)
            .user(prompt)
            .temperature(RECOMMEND_TEMPERATURE)
            .max_tokens(RECOMMEND_MAX_TOKENS)
            .build();

        let response = self.chat.chat(&self.model, request).await?;
        Ok(response.content().trim().to_string())
    }

    /// Synthesize famous-quote recommendations for an actor. The quotes
    /// come from the model's own knowledge, not the vector index.
    pub async fn recommend_for_actor(&self, actor: &str) -> Result<String, DomainError> {
        let prompt = format!(
            "List the most famous, memorable movie quotes delivered by {actor}.\n\
             For each quote name the movie, the year, and the character who says it.\n\
             Pick 3-5 quotes and add one sentence on why each line became iconic.\n\
             Only include quotes you are confident {actor} actually delivered on screen."
        );

        let request = ChatRequest::builder()
            .system(SYSTEM_PROMPT)
            .user(prompt)
            .temperature(LOOKUP_TEMPERATURE)
            .max_tokens(RECOMMEND_MAX_TOKENS)
            .build();

        let response = self.chat.chat(&self.model, request).await?;
        Ok(response.content().trim().to_string())
    }

    /// Synthesize a write-up of quotes retrieved for a movie title.
    pub async fn recommend_for_movie(
        &self,
        title: &str,
        quotes: &[ScoredQuote],
    ) -> Result<String, DomainError> {
        let prompt = format!(
            "Someone wants memorable quotes from the movie \"{title}\".\n\
             \n\
             {context}\n\
             \n\
             Present the best of these quotes, say who delivers each line and in what \
             scene if you know it, and add a short note on what makes each one great.\n\
             Keep it short, practical, and fun!",
            context = Self::quote_context(quotes),
        );

        let request = ChatRequest::builder()
            .system(SYSTEM_PROMPT)
            .user(prompt)
            .temperature(LOOKUP_TEMPERATURE)
            .max_tokens(RECOMMEND_MAX_TOKENS)
            .build();

        let response = self.chat.chat(&self.model, request).await?;
        Ok(response.content().trim().to_string())
    }

    /// Ask the model to attribute the quotes mentioned in `source_text`
    /// as a JSON array. Degrades to an empty list on any failure.
    pub async fn attribute_quotes(&self, source_text: &str, subject: &str) -> Vec<AttributedQuote> {
        let prompt = format!(
            "The following text discusses movie quotes related to {subject}:\n\
             \n\
             {source_text}\n\
             \n\
             Extract every quote as a JSON array of objects with exactly these keys:\n\
             \"quote\", \"movie\", \"character\", \"year\".\n\
             Use the string \"Unknown\" for anything you cannot attribute and null for \
             unknown years. Respond with the JSON array only."
        );

        let request = ChatRequest::builder()
            .user(prompt)
            .temperature(LOOKUP_TEMPERATURE)
            .max_tokens(ATTRIBUTION_MAX_TOKENS)
            .build();

        let response = match self.chat.chat(&self.model, request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Attribution call failed, continuing without attribution");
                return Vec::new();
            }
        };

        Self::parse_attributions(response.content())
    }

    /// Parse an attribution reply; malformed elements are skipped.
    pub fn parse_attributions(text: &str) -> Vec<AttributedQuote> {
        let Some(array) = extract_json_array(text) else {
            warn!("No JSON array found in attribution reply");
            return Vec::new();
        };

        array
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .filter(|attr: &AttributedQuote| !attr.quote.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockChatProvider;
    use crate::domain::query::{classify, Mood};
    use crate::domain::quote::QuoteRecord;

    fn scored(text: &str, movie: &str) -> ScoredQuote {
        ScoredQuote {
            quote: QuoteRecord {
                id: "q".to_string(),
                text: text.to_string(),
                movie: movie.to_string(),
                character: None,
                year: Some(1999),
            },
            score: 0.8,
        }
    }

    #[test]
    fn test_extract_json_array_well_formed() {
        let value = extract_json_array(r#"[{"quote": "Hi", "movie": "M"}]"#).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_extract_json_array_embedded_in_prose() {
        let text = "Sure! Here are the quotes:\n[{\"quote\": \"Hi\"}]\nHope that helps!";
        let value = extract_json_array(text).unwrap();
        assert_eq!(value[0]["quote"], "Hi");
    }

    #[test]
    fn test_extract_json_array_malformed() {
        assert!(extract_json_array("no array here").is_none());
        assert!(extract_json_array("[not json at all").is_none());
        assert!(extract_json_array("[{\"quote\": }]").is_none());
    }

    #[test]
    fn test_extract_json_array_with_trailing_bracket_noise() {
        // The widest span is invalid; the narrowest parses.
        let text = "[1, 2, 3] and also this stray ]";
        let value = extract_json_array(text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_parse_attributions_fills_unknown_fields() {
        let text = r#"[{"quote": "I'll be back."}, {"quote": "Hasta la vista", "movie": "T2", "character": "T-800", "year": 1991}]"#;
        let attrs = ResponseSynthesizer::parse_attributions(text);

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].movie, "Unknown");
        assert_eq!(attrs[0].character, "Unknown");
        assert_eq!(attrs[0].year, None);
        assert_eq!(attrs[1].character, "T-800");
        assert_eq!(attrs[1].year, Some(1991));
    }

    #[test]
    fn test_parse_attributions_skips_empty_quotes() {
        let text = r#"[{"movie": "No quote"}, {"quote": "Real one"}]"#;
        let attrs = ResponseSynthesizer::parse_attributions(text);

        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].quote, "Real one");
    }

    #[test]
    fn test_quote_context_lists_quotes() {
        let context = ResponseSynthesizer::quote_context(&[scored("Why so serious?", "The Dark Knight")]);

        assert!(context.contains("MATCHING MOVIE QUOTES:"));
        assert!(context.contains("1. \"Why so serious?\""));
        assert!(context.contains("Unknown from The Dark Knight (1999)"));
    }

    #[test]
    fn test_quote_context_empty() {
        assert_eq!(
            ResponseSynthesizer::quote_context(&[]),
            "No specific movie quotes found in database."
        );
    }

    #[tokio::test]
    async fn test_recommend_for_situation_returns_reply() {
        let chat = Arc::new(MockChatProvider::new().with_reply("  **Perfect Quote** ...  "));
        let synthesizer = ResponseSynthesizer::new(chat, "gpt-4o");
        let ctx = classify("I need a funny comeback", None);

        let text = synthesizer
            .recommend_for_situation(&ctx, &[scored("Quote", "Movie")])
            .await
            .unwrap();

        assert_eq!(text, "**Perfect Quote** ...");
    }

    #[test]
    fn test_situation_prompt_embeds_query_and_mood() {
        let ctx = classify("a dramatic exit from my office", Some(Mood::Dramatic));
        let prompt = ResponseSynthesizer::situation_prompt(&ctx, "CONTEXT");

        assert!(prompt.contains("THEIR SITUATION: a dramatic exit from my office"));
        assert!(prompt.contains("PREFERRED MOOD: dramatic"));
        assert!(prompt.contains("CONTEXT"));
    }

    #[tokio::test]
    async fn test_attribution_degrades_on_chat_error() {
        let chat = Arc::new(MockChatProvider::new().with_error("down"));
        let synthesizer = ResponseSynthesizer::new(chat, "gpt-4o");

        let attrs = synthesizer.attribute_quotes("some text", "an actor").await;
        assert!(attrs.is_empty());
    }

    #[tokio::test]
    async fn test_attribution_degrades_on_malformed_reply() {
        let chat = Arc::new(MockChatProvider::new().with_reply("I cannot produce JSON, sorry."));
        let synthesizer = ResponseSynthesizer::new(chat, "gpt-4o");

        let attrs = synthesizer.attribute_quotes("some text", "an actor").await;
        assert!(attrs.is_empty());
    }
}
