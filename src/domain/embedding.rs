//! Embedding provider trait

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Embedding dimensionality used across the service. The quote index and
/// the cache namespace are both built against this size.
pub const EMBEDDING_DIMENSIONS: usize = 1536;

/// A fixed-length vector representation of a text, with the token count
/// reported by the upstream model.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    vector: Vec<f32>,
    tokens: u32,
}

impl Embedding {
    pub fn new(vector: Vec<f32>, tokens: u32) -> Self {
        Self { vector, tokens }
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    pub fn into_vector(self) -> Vec<f32> {
        self.vector
    }

    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }

    pub fn tokens(&self) -> u32 {
        self.tokens
    }
}

/// Trait for text-embedding providers.
///
/// Implementations must reject empty input and surface upstream or
/// malformed-response failures as errors; callers never proceed to
/// search with a missing vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed a single non-empty text
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError>;

    /// The model identifier used for embedding
    fn model(&self) -> &str;

    /// Expected output dimensionality
    fn dimensions(&self) -> usize;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic mock provider; embeddings are derived from a hash of
    /// the input so equal texts embed equally. Counts calls so tests can
    /// assert the embedding stage was (or was not) reached.
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        dimensions: usize,
        calls: AtomicUsize,
        error: Option<String>,
    }

    impl MockEmbeddingProvider {
        pub fn new(dimensions: usize) -> Self {
            Self {
                dimensions,
                calls: AtomicUsize::new(0),
                error: None,
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(ref error) = self.error {
                return Err(DomainError::provider("mock", error));
            }

            if text.trim().is_empty() {
                return Err(DomainError::validation("Cannot embed empty text"));
            }

            let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_add(b as u64));
            let vector: Vec<f32> = (0..self.dimensions)
                .map(|i| ((hash.wrapping_add(i as u64) % 1000) as f32 / 1000.0) - 0.5)
                .collect();

            Ok(Embedding::new(vector, (text.len() / 4) as u32))
        }

        fn model(&self) -> &str {
            "mock-embedding"
        }

        fn dimensions(&self) -> usize {
            self.dimensions
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_embeddings_are_deterministic() {
            let provider = MockEmbeddingProvider::new(128);

            let a = provider.embed("Hello").await.unwrap();
            let b = provider.embed("Hello").await.unwrap();

            assert_eq!(a.vector(), b.vector());
            assert_eq!(a.dimensions(), 128);
            assert_eq!(provider.calls(), 2);
        }

        #[tokio::test]
        async fn test_mock_rejects_empty_text() {
            let provider = MockEmbeddingProvider::new(128);
            assert!(provider.embed("   ").await.is_err());
        }

        #[tokio::test]
        async fn test_mock_error() {
            let provider = MockEmbeddingProvider::new(128).with_error("API down");
            assert!(provider.embed("Hello").await.is_err());
            assert_eq!(provider.calls(), 1);
        }
    }
}
