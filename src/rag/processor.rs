// Query processor: retrieve -> build context -> complete
use tracing::{debug, instrument, warn};

use crate::display_mode::DisplayMode;
use crate::errors::{RagError, Result};
use crate::models::ChatModel;
use crate::rag::context::build_context;
use crate::rag::prompt::PromptTemplate;
use crate::vector_db::Retriever;

/// Answers one query from retrieved context
///
/// Borrows long-lived handles; holds no state between calls. Each step
/// finishes before the next starts and any failure ends the call.
pub struct QueryProcessor<'a> {
    retriever: &'a dyn Retriever,
    chat: &'a dyn ChatModel,
    prompt: &'a PromptTemplate,
    display: &'a DisplayMode,
}

impl<'a> QueryProcessor<'a> {
    pub fn new(
        retriever: &'a dyn Retriever,
        chat: &'a dyn ChatModel,
        prompt: &'a PromptTemplate,
        display: &'a DisplayMode,
    ) -> Self {
        Self {
            retriever,
            chat,
            prompt,
            display,
        }
    }

    /// Answer `query` from the chunks the store returns for it
    ///
    /// Returns the first choice's content exactly as the model produced it.
    #[instrument(skip_all, fields(model = %self.chat.model()))]
    pub async fn process_query(&self, query: &str) -> Result<String> {
        if query.is_empty() {
            return Err(RagError::EmptyQuery);
        }

        // Two spaces: label and query are printed as separate fields
        self.display
            .show_info(&format!("Searching Chunks :  {}", query))
            .await;

        let results = self.retriever.similarity_search(query).await?;
        if results.is_empty() {
            // Passed through: the model is asked with an empty context block.
            warn!("similarity search returned no chunks");
        }

        let context = build_context(&results)?;
        debug!(chunks = results.len(), context_bytes = context.len(), "assembled context");

        let messages = self.prompt.messages(&context, query);
        let answer = self.chat.complete(&messages).await?;

        self.display.show_answer(&answer).await;
        Ok(answer)
    }
}
