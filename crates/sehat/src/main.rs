//! Sehat CLI - your AI nutritionist.
//!
//! Upload a photo of a product label, food item, or menu and get a
//! plain-language nutrition summary from a remote vision model.
//!
//! # Usage
//!
//! ```bash
//! # Analyze one image from the terminal
//! sehat analyze label.jpg --model qwen/qwen-2.5-72b-instruct
//!
//! # Start the web UI
//! sehat serve --port 7860
//!
//! # List supported models
//! sehat models
//!
//! # View configuration
//! sehat config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;
mod server;

/// Sehat - nutrition insights from photos of labels, food, and menus.
#[derive(Parser, Debug)]
#[command(name = "sehat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a single image and print the result
    Analyze(cli::analyze::AnalyzeArgs),

    /// Serve the web UI
    Serve(cli::serve::ServeArgs),

    /// List supported models
    Models,

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match sehat_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `sehat config path`."
            );
            sehat_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Sehat v{}", sehat_core::VERSION);

    match cli.command {
        Commands::Analyze(args) => cli::analyze::execute(args, config).await,
        Commands::Serve(args) => cli::serve::execute(args, config).await,
        Commands::Models => cli::models::execute(&config),
        Commands::Config(args) => cli::config::execute(args, &config),
    }
}
