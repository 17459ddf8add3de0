//! Chat completion module
//!
//! Message types and the HTTP client used for the answering step.

pub mod client;
pub mod types;

pub use client::{ChatModel, OpenAIChatClient, DEFAULT_CHAT_MODEL, DEFAULT_OPENAI_URL};
pub use types::{ChatMessage, Role};
