//! pdfrag - grounded answers from PDF chunks in Qdrant
//!
//! A query is embedded, matched against an existing Qdrant collection, and
//! the retrieved chunks are handed to an OpenAI chat model as context.
//!
//! # Architecture
//!
//! - **rag**: context formatting, prompt template, query processor
//! - **vector_db** / **embedding** / **models**: external service clients
//! - **integration**: long-lived client handles
//! - **cli**, **repl**, **doctor**: the binary's surfaces

pub mod errors;
pub mod config;

// Re-export commonly used types
pub use errors::{RagError, Result};

// External services
pub mod embedding;
pub mod vector_db;
pub mod models;

// Query pipeline
pub mod rag;
pub mod integration;

// Display mode abstraction for CLI and captured output
pub mod display_mode;
pub use display_mode::DisplayMode;

// Binary surfaces
pub mod cli;
pub mod repl;
pub mod doctor;
