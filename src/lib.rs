//! Reelquote API
//!
//! Recommends movie quotes for a described social situation, an actor
//! or a movie title, backed by:
//! - An OpenAI-style embedding and chat-completion API
//! - A Pinecone-style vector index holding the quote collection
//! - A semantic cache namespace that reuses synthesized responses for
//!   similar queries and tracks the cost saved by doing so

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use api::state::AppState;
use domain::cache::CachePolicy;
use domain::embedding::EmbeddingProvider;
use domain::llm::ChatProvider;
use domain::vector::VectorStore;
use infrastructure::embedding::OpenAiEmbeddings;
use infrastructure::http_client::HttpClient;
use infrastructure::llm::OpenAiChat;
use infrastructure::services::{RecommendationService, ResponseSynthesizer, SemanticCacheService};
use infrastructure::vector::PineconeStore;

fn required_setting(
    configured: &Option<String>,
    env_var: &str,
    what: &str,
) -> anyhow::Result<String> {
    configured
        .clone()
        .or_else(|| std::env::var(env_var).ok())
        .with_context(|| format!("{what} is required (set {env_var})"))
}

/// Build the application state from configuration. All clients are
/// constructed here and injected; there are no ambient globals.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let openai_key = required_setting(&config.openai.api_key, "OPENAI_API_KEY", "OpenAI API key")?;
    let pinecone_key =
        required_setting(&config.pinecone.api_key, "PINECONE_API_KEY", "Pinecone API key")?;
    let pinecone_host =
        required_setting(&config.pinecone.host, "PINECONE_HOST", "Pinecone index host")?;

    let http = HttpClient::new();

    let embeddings: Arc<dyn EmbeddingProvider> = {
        let provider = match &config.openai.base_url {
            Some(base_url) => OpenAiEmbeddings::with_base_url(http.clone(), &openai_key, base_url),
            None => OpenAiEmbeddings::new(http.clone(), &openai_key),
        };
        Arc::new(provider.with_model(&config.openai.embedding_model))
    };

    let chat: Arc<dyn ChatProvider> = match &config.openai.base_url {
        Some(base_url) => Arc::new(OpenAiChat::with_base_url(http.clone(), &openai_key, base_url)),
        None => Arc::new(OpenAiChat::new(http.clone(), &openai_key)),
    };

    let store: Arc<dyn VectorStore> =
        Arc::new(PineconeStore::new(http, pinecone_key, pinecone_host));

    let cache = if config.cache.enabled {
        let policy = CachePolicy {
            similarity_threshold: config.cache.similarity_threshold,
            min_query_length: config.cache.min_query_length,
            ..CachePolicy::default()
        };
        Some(Arc::new(SemanticCacheService::new(
            Arc::clone(&embeddings),
            Arc::clone(&store),
            policy,
            &config.pinecone.cache_namespace,
            &config.openai.chat_model,
        )))
    } else {
        info!("Semantic cache disabled by configuration");
        None
    };

    let synthesizer = ResponseSynthesizer::new(chat, &config.openai.chat_model);
    let recommendations = Arc::new(RecommendationService::new(
        embeddings,
        store,
        synthesizer,
        cache.clone(),
        &config.pinecone.quotes_namespace,
    ));

    Ok(AppState::new(recommendations, cache))
}
