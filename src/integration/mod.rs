//! Wiring of the external services into the query pipeline

pub mod services;

pub use services::RagContext;
