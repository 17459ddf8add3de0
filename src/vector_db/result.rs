// Search result as handed from the vector store to context assembly
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::errors::{RagError, Result};

/// One retrieved chunk with its metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub page_content: String,
    pub metadata: Map<String, JsonValue>,
    /// Similarity score reported by the store
    pub score: f32,
}

impl SearchResult {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            ..Default::default()
        }
    }

    pub fn with_metadata(mut self, key: &str, value: JsonValue) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// Metadata lookup that fails when the key is absent
    pub fn metadata_value(&self, key: &str, index: usize) -> Result<&JsonValue> {
        self.metadata.get(key).ok_or_else(|| RagError::MissingMetadata {
            key: key.to_string(),
            index,
        })
    }
}
