//! pdfrag - main CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pdfrag::{
    cli::{Args, Commands, Verbosity},
    config::Config,
    doctor::Doctor,
    integration::RagContext,
    repl::ReplSession,
    DisplayMode,
};

/// Logs go to stderr; RUST_LOG wins over the verbosity flags
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Answer one query and release the clients
async fn run_query(config: &Config, query: &str) -> Result<()> {
    let context = RagContext::connect(config).context("Failed to initialize service clients")?;
    let display = DisplayMode::cli();

    let outcome = context.processor(&display).process_query(query).await;
    context.shutdown();

    outcome.context("Query failed")?;
    Ok(())
}

async fn run_repl(config: &Config) -> Result<()> {
    let context = RagContext::connect(config).context("Failed to initialize service clients")?;
    let mut session = ReplSession::new()?;

    let outcome = session.run(&context).await;
    context.shutdown();
    outcome
}

async fn run_doctor(config: Config) -> Result<()> {
    let checks = Doctor::new(config).run_diagnostics().await;
    Doctor::print_results(&checks);

    if !Doctor::overall_status(&checks) {
        anyhow::bail!("diagnostics failed");
    }
    Ok(())
}

/// Write a default config file; `--config` picks the target
fn init_config(path: Option<PathBuf>) -> Result<()> {
    let path = path
        .or_else(Config::default_path)
        .context("No home directory; pass --config to choose a location")?;

    Config::init_file(&path).context("Failed to write configuration")?;
    println!("{} {}", "Wrote default configuration to".green(), path.display());
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    let rendered = toml::to_string_pretty(&config.redacted()).context("Failed to render config")?;
    match Config::default_path() {
        Some(path) => println!("{} {}\n", "# default location:".dimmed(), path.display()),
        None => println!("{}\n", "# no home directory; using built-in defaults".dimmed()),
    }
    println!("{}", rendered);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    if let Err(msg) = args.validate() {
        eprintln!("{} {}", "Error:".red().bold(), msg);
        std::process::exit(2);
    }

    init_logging(args.verbosity());

    // The target file may not exist yet, so skip loading
    if let Some(Commands::Config { init: true }) = args.command {
        return init_config(args.config);
    }

    let config = Config::load(args.config.clone()).context("Failed to load configuration")?;

    match args.command {
        Some(Commands::Ask { query }) => run_query(&config, &query).await,
        Some(Commands::Repl) => run_repl(&config).await,
        Some(Commands::Doctor) => run_doctor(config).await,
        Some(Commands::Config { .. }) => show_config(&config),
        None => {
            let query = args.query.context("Query required")?;
            run_query(&config, &query).await
        }
    }
}
