//! Pinecone REST client.
//!
//! Talks to a single index host with API-key authentication, using the
//! data-plane endpoints `/query`, `/vectors/upsert` and
//! `/describe_index_stats`. Namespaces partition quote data from cache
//! data within the one index.

use async_trait::async_trait;
use serde::Deserialize;

use super::super::http_client::HttpClientTrait;
use crate::domain::vector::{IndexStats, VectorMatch, VectorQuery, VectorRecord, VectorStore};
use crate::domain::DomainError;

/// Pinecone index client
#[derive(Debug)]
pub struct PineconeStore<C: HttpClientTrait> {
    client: C,
    api_key: String,
    host: String,
}

impl<C: HttpClientTrait> PineconeStore<C> {
    pub fn new(client: C, api_key: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            host: host.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Api-Key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }
}

#[async_trait]
impl<C: HttpClientTrait> VectorStore for PineconeStore<C> {
    async fn query(&self, query: &VectorQuery) -> Result<Vec<VectorMatch>, DomainError> {
        let mut body = serde_json::json!({
            "vector": query.vector,
            "topK": query.top_k,
            "namespace": query.namespace,
            "includeMetadata": true,
        });

        if let Some(ref filter) = query.filter {
            body["filter"] = filter.clone();
        }

        let response = self
            .client
            .post_json(&self.url("/query"), self.headers(), &body)
            .await
            .map_err(|e| DomainError::provider("pinecone", format!("Search unavailable: {}", e)))?;

        let parsed: PineconeQueryResponse = serde_json::from_value(response).map_err(|e| {
            DomainError::provider("pinecone", format!("Failed to parse query response: {}", e))
        })?;

        let mut matches: Vec<VectorMatch> = parsed
            .matches
            .unwrap_or_default()
            .into_iter()
            .map(|m| VectorMatch {
                id: m.id,
                score: m.score.unwrap_or(0.0),
                metadata: m.metadata.unwrap_or(serde_json::Value::Null),
            })
            .collect();

        // Descending by score is part of the trait contract
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        Ok(matches)
    }

    async fn upsert(
        &self,
        namespace: &str,
        records: Vec<VectorRecord>,
    ) -> Result<(), DomainError> {
        let vectors: Vec<serde_json::Value> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.id,
                    "values": r.values,
                    "metadata": r.metadata,
                })
            })
            .collect();

        let body = serde_json::json!({
            "vectors": vectors,
            "namespace": namespace,
        });

        self.client
            .post_json(&self.url("/vectors/upsert"), self.headers(), &body)
            .await
            .map_err(|e| DomainError::provider("pinecone", format!("Upsert failed: {}", e)))?;

        Ok(())
    }

    async fn stats(&self) -> Result<IndexStats, DomainError> {
        let response = self
            .client
            .post_json(
                &self.url("/describe_index_stats"),
                self.headers(),
                &serde_json::json!({}),
            )
            .await
            .map_err(|e| DomainError::provider("pinecone", format!("Stats unavailable: {}", e)))?;

        let parsed: PineconeStatsResponse = serde_json::from_value(response).map_err(|e| {
            DomainError::provider("pinecone", format!("Failed to parse stats response: {}", e))
        })?;

        Ok(IndexStats {
            total_vectors: parsed.total_vector_count.unwrap_or(0),
        })
    }
}

// Pinecone API response types

#[derive(Debug, Deserialize)]
struct PineconeQueryResponse {
    matches: Option<Vec<PineconeMatch>>,
}

#[derive(Debug, Deserialize)]
struct PineconeMatch {
    id: String,
    score: Option<f32>,
    metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PineconeStatsResponse {
    total_vector_count: Option<u64>,
}
