//! Error types for pdfrag
//!
//! Every failure along the query pipeline surfaces as a [`RagError`] and is
//! propagated to the caller unchanged. Nothing here retries or recovers.

use thiserror::Error;

/// Main error type for the retrieval and answering pipeline
#[derive(Error, Debug)]
pub enum RagError {
    /// Query text was empty or whitespace only
    #[error("Query must not be empty")]
    EmptyQuery,

    /// A retrieved chunk lacks a metadata key needed for its context record
    #[error("Search result {index} is missing metadata key '{key}'")]
    MissingMetadata { key: String, index: usize },

    /// Vector store errors (connection, collection, search)
    #[error("Vector store error: {0}")]
    VectorStore(String),

    /// Embedding API errors
    #[error("Embedding API error: {0}")]
    EmbeddingApi(String),

    /// Chat completion API errors
    #[error("Chat completion API error: {0}")]
    CompletionApi(String),

    /// A provider answered 2xx with a body we cannot use
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, RagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_metadata_display() {
        let err = RagError::MissingMetadata {
            key: "page_label".to_string(),
            index: 3,
        };
        assert!(err.to_string().contains("page_label"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: RagError = io.into();
        assert!(matches!(err, RagError::Io(_)));
    }
}
