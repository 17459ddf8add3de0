// Vector store - similarity search over an existing Qdrant collection
use async_trait::async_trait;
use qdrant_client::{
    qdrant::{value::Kind, CollectionExistsRequest, SearchPointsBuilder, Value as QdrantValue},
    Qdrant,
};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::QdrantConfig;
use crate::embedding::Embedder;
use crate::errors::{RagError, Result};
use crate::vector_db::SearchResult;

/// Search by query text, get ranked chunks back
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn similarity_search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Handle to a pre-populated collection
///
/// Points are expected to carry the chunk text under `content_payload_key`
/// and an object of metadata under `metadata_payload_key`, which is how the
/// ingestion side (LangChain's Qdrant store) writes them.
pub struct QdrantVectorStore {
    client: Qdrant,
    embedder: Arc<dyn Embedder>,
    collection: String,
    top_k: u64,
    content_payload_key: String,
    metadata_payload_key: String,
}

impl QdrantVectorStore {
    /// Connect to an existing collection; nothing is created
    pub fn from_existing_collection(config: &QdrantConfig, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let client = Qdrant::from_url(&config.url)
            .api_key(config.api_key.clone())
            .build()
            .map_err(|e| RagError::VectorStore(format!("Failed to create Qdrant client: {}", e)))?;

        info!(url = %config.url, collection = %config.collection, "connected vector store");

        Ok(Self {
            client,
            embedder,
            collection: config.collection.clone(),
            top_k: config.top_k,
            content_payload_key: config.content_payload_key.clone(),
            metadata_payload_key: config.metadata_payload_key.clone(),
        })
    }

    /// Check that the collection exists
    pub async fn collection_exists(&self) -> Result<bool> {
        self.client
            .collection_exists(CollectionExistsRequest {
                collection_name: self.collection.clone(),
            })
            .await
            .map_err(|e| RagError::VectorStore(format!("Failed to check collection: {}", e)))
    }

    /// Server version when Qdrant is reachable
    pub async fn health_check(&self) -> Result<String> {
        let reply = self
            .client
            .health_check()
            .await
            .map_err(|e| RagError::VectorStore(format!("Qdrant health check failed: {}", e)))?;
        Ok(reply.version)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl Retriever for QdrantVectorStore {
    async fn similarity_search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let embedding = self.embedder.embed(query).await?;

        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(self.collection.clone(), embedding, self.top_k)
                    .with_payload(true),
            )
            .await
            .map_err(|e| {
                RagError::VectorStore(format!("Failed to search '{}': {}", self.collection, e))
            })?;

        debug!(collection = %self.collection, hits = response.result.len(), "similarity search");

        Ok(response
            .result
            .into_iter()
            .map(|point| {
                point_to_result(
                    &point.payload,
                    point.score,
                    &self.content_payload_key,
                    &self.metadata_payload_key,
                )
            })
            .collect())
    }
}

/// Build a search result from a point payload
///
/// A missing content key yields empty text and a missing or non-object
/// metadata entry yields empty metadata; lookups fail later, at formatting.
fn point_to_result(
    payload: &HashMap<String, QdrantValue>,
    score: f32,
    content_key: &str,
    metadata_key: &str,
) -> SearchResult {
    let page_content = payload
        .get(content_key)
        .and_then(qdrant_value_to_string)
        .unwrap_or_default();

    let metadata = match payload.get(metadata_key).map(qdrant_to_json_value) {
        Some(JsonValue::Object(map)) => map,
        _ => Map::new(),
    };

    SearchResult {
        page_content,
        metadata,
        score,
    }
}

fn qdrant_to_json_value(value: &QdrantValue) -> JsonValue {
    match &value.kind {
        None | Some(Kind::NullValue(_)) => JsonValue::Null,
        Some(Kind::BoolValue(b)) => JsonValue::Bool(*b),
        Some(Kind::IntegerValue(i)) => JsonValue::from(*i),
        Some(Kind::DoubleValue(f)) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Some(Kind::StringValue(s)) => JsonValue::String(s.clone()),
        Some(Kind::StructValue(s)) => JsonValue::Object(
            s.fields
                .iter()
                .map(|(k, v)| (k.clone(), qdrant_to_json_value(v)))
                .collect(),
        ),
        Some(Kind::ListValue(list)) => {
            JsonValue::Array(list.values.iter().map(qdrant_to_json_value).collect())
        }
    }
}

fn qdrant_value_to_string(value: &QdrantValue) -> Option<String> {
    match &value.kind {
        Some(Kind::StringValue(s)) => Some(s.clone()),
        _ => None,
    }
}
