//! The `sehat models` command.

use sehat_core::{Config, ModelId};

/// Print every supported model, marking the configured default.
pub fn execute(config: &Config) -> anyhow::Result<()> {
    for model in ModelId::ALL {
        let marker = if model == config.inference.default_model {
            " (default)"
        } else {
            ""
        };
        println!("{model}{marker}");
    }
    Ok(())
}
