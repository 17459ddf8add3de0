//! Display mode abstraction for console output
//!
//! The query pipeline writes its two diagnostic lines through a
//! [`DisplayMode`], so the same code can print to the terminal or record
//! into a buffer that callers inspect afterwards.

use colored::Colorize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Marker printed in front of every answer
pub const ANSWER_PREFIX: &str = "🤖: ";

/// Display mode determines where output goes
#[derive(Clone)]
pub enum DisplayMode {
    /// Direct terminal output
    Cli,

    /// In-memory capture, one entry per line shown
    Buffer(Arc<Mutex<Vec<String>>>),
}

impl DisplayMode {
    /// Create CLI display mode
    pub fn cli() -> Self {
        Self::Cli
    }

    /// Create a capturing display mode
    pub fn buffer() -> Self {
        Self::Buffer(Arc::new(Mutex::new(Vec::new())))
    }

    /// Show an informational message
    pub async fn show_info(&self, message: &str) {
        match self {
            Self::Cli => println!("{}", message),
            Self::Buffer(lines) => lines.lock().await.push(message.to_string()),
        }
    }

    /// Show a generated answer with the robot marker
    pub async fn show_answer(&self, answer: &str) {
        match self {
            Self::Cli => println!("{}{}", ANSWER_PREFIX, answer.bright_white()),
            Self::Buffer(lines) => lines.lock().await.push(format!("{}{}", ANSWER_PREFIX, answer)),
        }
    }

    /// Show an error message
    pub async fn show_error(&self, message: &str) {
        match self {
            Self::Cli => eprintln!("{} {}", "Error:".red().bold(), message),
            Self::Buffer(lines) => lines.lock().await.push(format!("Error: {}", message)),
        }
    }

    /// Lines captured so far; always empty in CLI mode
    pub async fn captured(&self) -> Vec<String> {
        match self {
            Self::Cli => Vec::new(),
            Self::Buffer(lines) => lines.lock().await.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cli_messages_do_not_panic() {
        let mode = DisplayMode::cli();
        mode.show_info("Test message").await;
        mode.show_answer("Answer").await;
        mode.show_error("Error").await;
        assert!(mode.captured().await.is_empty());
    }

    #[tokio::test]
    async fn test_buffer_captures_in_order() {
        let mode = DisplayMode::buffer();
        mode.show_info("Searching Chunks : q").await;
        mode.show_answer("See page 3").await;
        mode.show_error("boom").await;

        assert_eq!(
            mode.captured().await,
            vec![
                "Searching Chunks : q".to_string(),
                "🤖: See page 3".to_string(),
                "Error: boom".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_clones_share_buffer() {
        let mode = DisplayMode::buffer();
        let cloned = mode.clone();
        cloned.show_info("shared").await;
        assert_eq!(mode.captured().await, vec!["shared".to_string()]);
    }
}
