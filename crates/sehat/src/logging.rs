//! Logging initialization.
//!
//! Human-readable or JSON output via `tracing-subscriber`, always on stderr
//! so `sehat analyze` can keep stdout for the result text.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// `RUST_LOG` overrides the level chosen by `verbose`.
pub fn init(verbose: bool, json_format: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let output = fmt::layer().with_writer(std::io::stderr);
    let output = if json_format {
        output.json().boxed()
    } else {
        output.with_target(false).with_ansi(true).boxed()
    };

    tracing_subscriber::registry().with(filter).with(output).init();
}

/// Initialize logging from the `[logging]` config section, with CLI overrides.
pub fn init_from_config(config: &sehat_core::Config, verbose_override: bool, json_override: bool) {
    let verbose =
        verbose_override || matches!(config.logging.level.as_str(), "debug" | "trace");
    let json_format = json_override || config.logging.format == "json";
    init(verbose, json_format);
}
