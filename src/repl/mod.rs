//! Interactive question loop
//!
//! Every non-empty line is answered through the query pipeline. A failed
//! query is reported and the loop carries on.

pub mod input;

use anyhow::Result;

use crate::display_mode::DisplayMode;
use crate::integration::RagContext;
use crate::repl::input::InputHandler;

/// Words that end the session
const EXIT_COMMANDS: [&str; 3] = ["exit", "quit", "/exit"];

/// Check whether a line asks to leave the loop
pub fn is_exit_command(line: &str) -> bool {
    EXIT_COMMANDS.contains(&line.trim().to_lowercase().as_str())
}

/// REPL session coordinator
pub struct ReplSession {
    input_handler: InputHandler,
    display: DisplayMode,
}

impl ReplSession {
    /// Create REPL session with persistent history at `~/.pdfrag/history`
    pub fn new() -> Result<Self> {
        let history = crate::config::Config::state_dir().join("history");
        Ok(Self {
            input_handler: InputHandler::with_history(history)?,
            display: DisplayMode::cli(),
        })
    }

    /// Run until EOF or an exit command
    pub async fn run(&mut self, context: &RagContext) -> Result<()> {
        let processor = context.processor(&self.display);
        self.display
            .show_info("Ask a question about your documents (exit to quit).")
            .await;

        while let Some(line) = self.input_handler.read_line()? {
            if line.is_empty() {
                continue;
            }
            if is_exit_command(&line) {
                break;
            }

            if let Err(e) = processor.process_query(&line).await {
                self.display.show_error(&e.to_string()).await;
            }
        }

        self.input_handler.save_history()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command(" QUIT "));
        assert!(is_exit_command("/exit"));
        assert!(!is_exit_command("exit strategy on page 4?"));
    }
}
