//! The `sehat serve` command.

use clap::Args;
use sehat_core::Config;

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides `server.port`)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,
}

/// Execute the serve command.
pub async fn execute(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let settings = config.inference_settings();
    if settings.api_key.is_none() || settings.api_base.is_none() {
        tracing::warn!(
            "API_KEY or API_BASE is not set; every analysis will fail until both are configured"
        );
    }

    crate::server::run(config).await
}
