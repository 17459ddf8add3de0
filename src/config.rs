//! Configuration management for pdfrag
//!
//! TOML configuration with built-in defaults, environment overrides and
//! validation. Location: ~/.pdfrag/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::embedding::DEFAULT_EMBEDDING_MODEL;
use crate::errors::{RagError, Result};
use crate::models::{DEFAULT_CHAT_MODEL, DEFAULT_OPENAI_URL};
use crate::rag::prompt::{PromptTemplate, DEFAULT_SYSTEM_TEMPLATE};

/// Environment variable holding the OpenAI API key
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable overriding the OpenAI base URL
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
/// Environment variable overriding the Qdrant URL
pub const ENV_QDRANT_URL: &str = "QDRANT_URL";
/// Environment variable holding the Qdrant API key
pub const ENV_QDRANT_API_KEY: &str = "QDRANT_API_KEY";
/// Environment variable overriding the collection name
pub const ENV_COLLECTION: &str = "PDFRAG_COLLECTION";

/// Complete configuration for pdfrag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub openai: OpenAIConfig,
    #[serde(default)]
    pub qdrant: QdrantConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

/// OpenAI connection and model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAIConfig {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub chat_model: String,
    pub embedding_model: String,
    pub timeout_secs: u64,
}

/// Qdrant connection and collection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QdrantConfig {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub collection: String,
    /// Number of chunks the store returns per search
    pub top_k: u64,
    pub content_payload_key: String,
    pub metadata_payload_key: String,
}

/// Prompt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// System instruction; `{context}` marks where the context block goes
    pub system_template: String,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_URL.to_string(),
            api_key: None,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6334".to_string(),
            api_key: None,
            collection: "learning_rag".to_string(),
            top_k: 4,
            content_payload_key: "page_content".to_string(),
            metadata_payload_key: "metadata".to_string(),
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_template: DEFAULT_SYSTEM_TEMPLATE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or defaults, then apply environment overrides
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let mut config = if let Some(config_path) = path {
            Self::load_from_file(&config_path)?
        } else {
            Self::load_default()?
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RagError::Config(format!("Failed to read config: {}", e)))?;

        toml::from_str(&contents)
            .map_err(|e| RagError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load from the standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(config_path) if config_path.exists() => Self::load_from_file(&config_path),
            _ => Ok(Config::default()),
        }
    }

    /// Standard configuration file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".pdfrag").join("config.toml"))
    }

    /// Overlay values found by `lookup` (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = present(ENV_OPENAI_API_KEY) {
            self.openai.api_key = Some(key);
        }
        if let Some(url) = present(ENV_OPENAI_BASE_URL) {
            self.openai.base_url = url;
        }
        if let Some(url) = present(ENV_QDRANT_URL) {
            self.qdrant.url = url;
        }
        if let Some(key) = present(ENV_QDRANT_API_KEY) {
            self.qdrant.api_key = Some(key);
        }
        if let Some(collection) = present(ENV_COLLECTION) {
            self.qdrant.collection = collection;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.qdrant.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than 0".to_string()));
        }

        if self.qdrant.collection.trim().is_empty() {
            return Err(RagError::Config("collection must not be empty".to_string()));
        }

        if self.openai.chat_model.trim().is_empty() || self.openai.embedding_model.trim().is_empty() {
            return Err(RagError::Config("model names must not be empty".to_string()));
        }

        if self.openai.timeout_secs == 0 {
            return Err(RagError::Config("timeout_secs must be greater than 0".to_string()));
        }

        self.prompt_template().map(|_| ())
    }

    /// Parsed prompt template
    pub fn prompt_template(&self) -> Result<PromptTemplate> {
        PromptTemplate::new(self.prompt.system_template.clone())
    }

    /// OpenAI API key, required before any provider call
    pub fn openai_api_key(&self) -> Result<&str> {
        self.openai
            .api_key
            .as_deref()
            .ok_or_else(|| RagError::Config(format!("{} not set", ENV_OPENAI_API_KEY)))
    }

    /// Copy with secrets masked, for display
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.openai.api_key.is_some() {
            copy.openai.api_key = Some("***".to_string());
        }
        if copy.qdrant.api_key.is_some() {
            copy.qdrant.api_key = Some("***".to_string());
        }
        copy
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| RagError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Write a default configuration file, never replacing an existing one
    pub fn init_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(RagError::Config(format!(
                "{} already exists",
                path.display()
            )));
        }
        Config::default().save(path)
    }

    /// Directory for state such as REPL history
    pub fn state_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pdfrag")
    }
}
