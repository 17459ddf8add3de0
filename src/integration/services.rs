// Long-lived service handles shared by every query
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::display_mode::DisplayMode;
use crate::embedding::{Embedder, OpenAIEmbeddings};
use crate::errors::Result;
use crate::models::OpenAIChatClient;
use crate::rag::{PromptTemplate, QueryProcessor};
use crate::vector_db::QdrantVectorStore;

/// Clients built once at startup and lent to each query
///
/// All handles are read-only after construction. Call [`RagContext::shutdown`]
/// on exit to release them.
pub struct RagContext {
    embedder: Arc<dyn Embedder>,
    store: QdrantVectorStore,
    chat: OpenAIChatClient,
    prompt: PromptTemplate,
}

impl RagContext {
    /// Build the embedding client, vector store handle and chat client
    pub fn connect(config: &Config) -> Result<Self> {
        let api_key = config.openai_api_key()?;
        let timeout = Duration::from_secs(config.openai.timeout_secs);

        let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbeddings::new(
            &config.openai.base_url,
            api_key,
            &config.openai.embedding_model,
            timeout,
        )?);

        let store = QdrantVectorStore::from_existing_collection(&config.qdrant, embedder.clone())?;

        let chat = OpenAIChatClient::with_config(
            &config.openai.base_url,
            api_key,
            &config.openai.chat_model,
            timeout,
        )?;

        info!(
            chat_model = %config.openai.chat_model,
            embedding_model = %config.openai.embedding_model,
            "service clients ready"
        );

        Ok(Self {
            embedder,
            store,
            chat,
            prompt: config.prompt_template()?,
        })
    }

    /// A processor borrowing these handles
    pub fn processor<'a>(&'a self, display: &'a DisplayMode) -> QueryProcessor<'a> {
        QueryProcessor::new(&self.store, &self.chat, &self.prompt, display)
    }

    pub fn store(&self) -> &QdrantVectorStore {
        &self.store
    }

    pub fn embedding_model(&self) -> &str {
        self.embedder.model()
    }

    /// Release all clients
    pub fn shutdown(self) {
        let Self {
            embedder,
            store,
            chat,
            prompt: _,
        } = self;
        drop(chat);
        drop(store);
        drop(embedder);
        info!("service clients closed");
    }
}
