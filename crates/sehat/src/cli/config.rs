//! The `sehat config` command for configuration management.

use clap::{Args, Subcommand};
use sehat_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Report whether the API credential and base URL resolve
    Check,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, config: &Config) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            println!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            println!("{}", Config::default_path().display());
        }

        ConfigCommand::Check => {
            let settings = config.inference_settings();
            println!(
                "api_key:  {}",
                if settings.api_key.is_some() { "set" } else { "missing" }
            );
            println!(
                "api_base: {}",
                settings.api_base.as_deref().unwrap_or("missing")
            );
            println!("timeout:  {}ms", settings.timeout.as_millis());
            if settings.api_key.is_none() || settings.api_base.is_none() {
                anyhow::bail!("Inference is not configured. Set API_KEY and API_BASE.");
            }
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(&path, Config::default().to_toml()?)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
