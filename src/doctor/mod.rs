//! Doctor command for connectivity diagnostics
//!
//! Checks the pieces a query needs before one is attempted: credentials,
//! the OpenAI endpoint, the Qdrant server and the collection.

use colored::Colorize;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, ENV_OPENAI_API_KEY};
use crate::embedding::OpenAIEmbeddings;
use crate::errors::Result;
use crate::vector_db::QdrantVectorStore;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    config: Config,
}

impl Doctor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        let mut checks = vec![self.check_api_key()];

        if self.config.openai.api_key.is_some() {
            checks.push(self.check_openai().await);
        }

        match self.open_store() {
            Ok(store) => {
                let reachable = self.check_qdrant(&store).await;
                let reached = reachable.status == HealthStatus::Pass;
                checks.push(reachable);
                if reached {
                    checks.push(self.check_collection(&store).await);
                }
            }
            Err(e) => checks.push(HealthCheck::new(
                "Qdrant",
                HealthStatus::Fail(format!("Invalid client configuration: {}", e)),
            )),
        }

        checks
    }

    /// Store handle built the same way queries build it
    ///
    /// The embedder is never called here, so a missing key is not an error.
    fn open_store(&self) -> Result<QdrantVectorStore> {
        let embedder = OpenAIEmbeddings::new(
            &self.config.openai.base_url,
            self.config.openai.api_key.as_deref().unwrap_or_default(),
            &self.config.openai.embedding_model,
            Duration::from_secs(self.config.openai.timeout_secs),
        )?;
        QdrantVectorStore::from_existing_collection(&self.config.qdrant, Arc::new(embedder))
    }

    /// Check 1: API key configured
    fn check_api_key(&self) -> HealthCheck {
        match self.config.openai.api_key.as_deref() {
            Some(key) if key.starts_with("sk-") => HealthCheck::new("OpenAI API key", HealthStatus::Pass),
            Some(_) => HealthCheck::new(
                "OpenAI API key",
                HealthStatus::Warn("Key does not look like an OpenAI key".to_string()),
            ),
            None => HealthCheck::new(
                "OpenAI API key",
                HealthStatus::Fail(format!("{} not set", ENV_OPENAI_API_KEY)),
            ),
        }
    }

    /// Check 2: OpenAI endpoint accepts the key
    async fn check_openai(&self) -> HealthCheck {
        let client = match Client::builder().timeout(Duration::from_secs(10)).build() {
            Ok(client) => client,
            Err(e) => return HealthCheck::new("OpenAI API", HealthStatus::Fail(e.to_string())),
        };

        let url = format!("{}/models", self.config.openai.base_url.trim_end_matches('/'));
        let request = client
            .get(&url)
            .bearer_auth(self.config.openai.api_key.as_deref().unwrap_or_default());

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                HealthCheck::new("OpenAI API", HealthStatus::Pass)
            }
            Ok(response) => HealthCheck::new(
                "OpenAI API",
                HealthStatus::Fail(format!("HTTP {}", response.status())),
            ),
            Err(e) => HealthCheck::new(
                "OpenAI API",
                HealthStatus::Fail(format!("Not reachable: {}", e)),
            ),
        }
    }

    /// Check 3: Qdrant reachable
    async fn check_qdrant(&self, store: &QdrantVectorStore) -> HealthCheck {
        qdrant_status(&self.config.qdrant.url, store.health_check().await)
    }

    /// Check 4: collection present
    async fn check_collection(&self, store: &QdrantVectorStore) -> HealthCheck {
        collection_status(store.collection(), store.collection_exists().await)
    }

    /// Print health check results
    pub fn print_results(checks: &[HealthCheck]) {
        println!();
        println!("{}", "pdfrag diagnostics".bold());
        println!();

        for check in checks {
            let line = match &check.status {
                HealthStatus::Pass => format!("{} {}", "✓".green(), "OK".green()),
                HealthStatus::Warn(msg) => format!("{} {}", "!".yellow(), msg.yellow()),
                HealthStatus::Fail(msg) => format!("{} {}", "✗".red(), msg.red()),
            };
            println!("{:<20} {}", check.name, line);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}

fn qdrant_status(url: &str, outcome: Result<String>) -> HealthCheck {
    match outcome {
        Ok(_) => HealthCheck::new("Qdrant", HealthStatus::Pass),
        Err(e) => HealthCheck::new(
            "Qdrant",
            HealthStatus::Fail(format!("{} not reachable: {}", url, e)),
        ),
    }
}

fn collection_status(name: &str, outcome: Result<bool>) -> HealthCheck {
    match outcome {
        Ok(true) => HealthCheck::new("Collection", HealthStatus::Pass),
        Ok(false) => HealthCheck::new(
            "Collection",
            HealthStatus::Fail(format!("'{}' does not exist; ingest documents first", name)),
        ),
        Err(e) => HealthCheck::new("Collection", HealthStatus::Fail(e.to_string())),
    }
}
