//! Command-line argument parsing for pdfrag
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pdfrag - answer questions from your PDF chunks stored in Qdrant
#[derive(Parser, Debug)]
#[command(name = "pdfrag")]
#[command(version)]
#[command(about = "Answer questions from PDF chunks in Qdrant using an OpenAI chat model", long_about = None)]
pub struct Args {
    /// Question to answer
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: default (warnings), -v (info), -vv (debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only in logs)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a single question
    Ask {
        /// Question to answer
        query: String,
    },

    /// Start an interactive question loop
    Repl,

    /// Check credentials, Qdrant and the collection
    Doctor,

    /// Display the effective configuration
    Config {
        /// Write a default config file instead (to --config or ~/.pdfrag/config.toml)
        #[arg(long)]
        init: bool,
    },
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Check that exactly one of query and subcommand is given
    pub fn validate(&self) -> Result<(), String> {
        if self.command.is_none() && self.query.is_none() {
            return Err("Query required. Use 'pdfrag <QUERY>' or run a subcommand.".to_string());
        }

        if self.command.is_some() && self.query.is_some() {
            return Err("Cannot specify a query with a subcommand.".to_string());
        }

        Ok(())
    }
}

impl Verbosity {
    /// Default log filter directive for this level
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "pdfrag=info,warn",
            Verbosity::VeryVerbose => "pdfrag=debug,info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(query: Option<&str>, verbose: u8, quiet: bool, command: Option<Commands>) -> Args {
        Args {
            query: query.map(str::to_string),
            config: None,
            verbose,
            quiet,
            command,
        }
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(args(Some("q"), 0, true, None).verbosity(), Verbosity::Quiet);
        assert_eq!(args(Some("q"), 0, false, None).verbosity(), Verbosity::Normal);
        assert_eq!(args(Some("q"), 1, false, None).verbosity(), Verbosity::Verbose);
        assert_eq!(args(Some("q"), 3, false, None).verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn test_validate_success_with_query() {
        assert!(args(Some("q"), 0, false, None).validate().is_ok());
    }

    #[test]
    fn test_validate_success_with_subcommand() {
        assert!(args(None, 0, false, Some(Commands::Doctor)).validate().is_ok());
    }

    #[test]
    fn test_validate_fail_no_query_or_command() {
        assert!(args(None, 0, false, None).validate().is_err());
    }

    #[test]
    fn test_validate_fail_both_query_and_command() {
        assert!(args(Some("q"), 0, false, Some(Commands::Repl)).validate().is_err());
    }

    #[test]
    fn test_parse_ask_subcommand() {
        let parsed = Args::try_parse_from(["pdfrag", "-vv", "ask", "what is on page 3?"]).unwrap();
        assert_eq!(parsed.verbosity(), Verbosity::VeryVerbose);
        match parsed.command {
            Some(Commands::Ask { query }) => assert_eq!(query, "what is on page 3?"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_positional_query() {
        let parsed = Args::try_parse_from(["pdfrag", "--config", "/tmp/c.toml", "hello"]).unwrap();
        assert_eq!(parsed.query.as_deref(), Some("hello"));
        assert_eq!(parsed.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_parse_config_init() {
        let parsed = Args::try_parse_from(["pdfrag", "config", "--init"]).unwrap();
        assert!(parsed.validate().is_ok());
        assert!(matches!(parsed.command, Some(Commands::Config { init: true })));

        let parsed = Args::try_parse_from(["pdfrag", "config"]).unwrap();
        assert!(matches!(parsed.command, Some(Commands::Config { init: false })));
    }

    #[test]
    fn test_log_filters() {
        assert_eq!(Verbosity::Quiet.log_filter(), "error");
        assert!(Verbosity::VeryVerbose.log_filter().contains("debug"));
    }
}
