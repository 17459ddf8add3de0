// Query embedding provider used by the vector store
pub mod engine;

pub use engine::{Embedder, OpenAIEmbeddings, DEFAULT_EMBEDDING_MODEL};
