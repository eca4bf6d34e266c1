//! Domain layer - core types, traits and pure logic

pub mod cache;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod query;
pub mod quote;
pub mod scoring;
pub mod vector;

pub use cache::{CacheHit, CacheLookup, CachePolicy, CacheSkip, CachedResponse, PendingWrite};
pub use embedding::{Embedding, EmbeddingProvider, EMBEDDING_DIMENSIONS};
pub use error::DomainError;
pub use llm::{ChatProvider, ChatRequest, ChatResponse, Message, MessageRole, Usage};
pub use query::{classify, Mood, QueryContext, Situation};
pub use quote::{QuoteRecord, ScoredQuote};
pub use vector::{IndexStats, VectorMatch, VectorQuery, VectorRecord, VectorStore};
