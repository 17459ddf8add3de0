// Vector store access: Qdrant similarity search and its result type
pub mod result;
pub mod store;

pub use result::SearchResult;
pub use store::{QdrantVectorStore, Retriever};
