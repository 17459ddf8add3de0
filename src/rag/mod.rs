// Retrieval-augmented answering
//
// Components:
// - Context: format retrieved chunks into one context block
// - Prompt: system instruction template wrapping the context block
// - Processor: the query pipeline, retrieve -> context -> completion

pub mod context;
pub mod processor;
pub mod prompt;

// Re-export key types
pub use context::build_context;
pub use processor::QueryProcessor;
pub use prompt::PromptTemplate;
