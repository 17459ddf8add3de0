// System prompt template for grounded answers
use crate::errors::{RagError, Result};
use crate::models::ChatMessage;

/// Placeholder replaced by the context block
pub const CONTEXT_PLACEHOLDER: &str = "{context}";

/// Built-in system instruction. The context block always comes last.
pub const DEFAULT_SYSTEM_TEMPLATE: &str = "You are a helpful AI Assistant who answers user queries based on the available context retrieved from a PDF file, along with page contents and page numbers.

You should only answer the user based on the following context and navigate the user to open the right page number to know more.

Context :
{context}
";

/// System prompt template with a single `{context}` slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Create a template, rejecting text without exactly one placeholder
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let slots = template.matches(CONTEXT_PLACEHOLDER).count();
        if slots != 1 {
            return Err(RagError::Config(format!(
                "prompt template must contain {} exactly once (found {})",
                CONTEXT_PLACEHOLDER, slots
            )));
        }
        Ok(Self { template })
    }

    /// Substitute the context block into the template
    pub fn render(&self, context: &str) -> String {
        self.template.replacen(CONTEXT_PLACEHOLDER, context, 1)
    }

    /// The two-message prompt: system instruction, then the raw query
    pub fn messages(&self, context: &str, query: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.render(context)),
            ChatMessage::user(query),
        ]
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_SYSTEM_TEMPLATE.to_string(),
        }
    }
}
