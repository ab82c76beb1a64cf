//! The `sehat analyze` command: one image in, analysis text out.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use sehat_core::{Analyzer, Config, ModelId};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Image of a product label, food item, or menu
    #[arg(required = true)]
    pub image: PathBuf,

    /// Model to use (defaults to `inference.default_model`)
    #[arg(short, long)]
    pub model: Option<ModelId>,

    /// Hide the progress spinner
    #[arg(long)]
    pub quiet: bool,
}

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs, config: Config) -> anyhow::Result<()> {
    if !args.image.is_file() {
        anyhow::bail!(
            "Image does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            args.image
        );
    }

    let bytes = tokio::fs::read(&args.image).await?;
    let model = args.model.unwrap_or(config.inference.default_model);
    let analyzer = Analyzer::from_config(&config);

    tracing::debug!("Analyzing {:?} with {model}", args.image);

    let spinner = (!args.quiet).then(|| create_spinner(model));
    let result = analyzer.analyze_bytes(Some(bytes), model).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if result.is_error() {
        anyhow::bail!("{result}");
    }
    println!("{result}");
    Ok(())
}

fn create_spinner(model: ModelId) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("asking {model}..."));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
