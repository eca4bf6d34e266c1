//! Vector store trait and search types

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A vector with metadata, as upserted into the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: serde_json::Value,
}

impl VectorRecord {
    pub fn new(id: impl Into<String>, values: Vec<f32>, metadata: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            values,
            metadata,
        }
    }
}

/// A single nearest-neighbor result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorMatch {
    pub id: String,
    /// Similarity score in [0, 1], higher is closer
    pub score: f32,
    pub metadata: serde_json::Value,
}

/// Parameters for a nearest-neighbor query.
#[derive(Debug, Clone)]
pub struct VectorQuery {
    pub vector: Vec<f32>,
    pub top_k: usize,
    pub namespace: String,
    /// Optional metadata equality filter, in the store's filter syntax
    pub filter: Option<serde_json::Value>,
}

impl VectorQuery {
    pub fn new(vector: Vec<f32>, top_k: usize, namespace: impl Into<String>) -> Self {
        Self {
            vector,
            top_k,
            namespace: namespace.into(),
            filter: None,
        }
    }

    /// Add an equality filter on a metadata field
    pub fn with_eq_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter = Some(serde_json::json!({
            field.into(): { "$eq": value.into() }
        }));
        self
    }
}

/// Aggregate statistics for the backing index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_vectors: u64,
}

/// Trait for vector database backends.
///
/// Contract: `query` returns matches ordered descending by score and
/// tolerates empty result sets (empty list, not an error); connectivity
/// and auth failures surface as provider errors, distinct from
/// no-matches.
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Retrieve nearest neighbors for a vector
    async fn query(&self, query: &VectorQuery) -> Result<Vec<VectorMatch>, DomainError>;

    /// Insert or overwrite records in a namespace
    async fn upsert(&self, namespace: &str, records: Vec<VectorRecord>)
        -> Result<(), DomainError>;

    /// Describe the backing index
    async fn stats(&self) -> Result<IndexStats, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock vector store with canned matches per namespace and recorded
    /// upserts.
    #[derive(Debug, Default)]
    pub struct MockVectorStore {
        matches: HashMap<String, Vec<VectorMatch>>,
        upserts: Mutex<Vec<(String, VectorRecord)>>,
        total_vectors: u64,
        error: Option<String>,
    }

    impl MockVectorStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_matches(
            mut self,
            namespace: impl Into<String>,
            matches: Vec<VectorMatch>,
        ) -> Self {
            self.matches.insert(namespace.into(), matches);
            self
        }

        pub fn with_total_vectors(mut self, total: u64) -> Self {
            self.total_vectors = total;
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        /// Records upserted so far, in call order
        pub fn upserted(&self) -> Vec<(String, VectorRecord)> {
            self.upserts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VectorStore for MockVectorStore {
        async fn query(&self, query: &VectorQuery) -> Result<Vec<VectorMatch>, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::provider("mock", error));
            }

            let mut results = self
                .matches
                .get(&query.namespace)
                .cloned()
                .unwrap_or_default();
            results.truncate(query.top_k);

            Ok(results)
        }

        async fn upsert(
            &self,
            namespace: &str,
            records: Vec<VectorRecord>,
        ) -> Result<(), DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::provider("mock", error));
            }

            let mut upserts = self.upserts.lock().unwrap();
            for record in records {
                upserts.push((namespace.to_string(), record));
            }

            Ok(())
        }

        async fn stats(&self) -> Result<IndexStats, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::provider("mock", error));
            }

            Ok(IndexStats {
                total_vectors: self.total_vectors,
            })
        }
    }
}
