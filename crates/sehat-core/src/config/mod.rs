//! Configuration management for Sehat.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Credentials are resolved once at startup into
//! [`InferenceSettings`] and handed to the inference client by reference.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure for Sehat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote inference settings
    pub inference: InferenceConfig,

    /// Image normalization settings
    pub preprocess: PreprocessConfig,

    /// Upload limits
    pub limits: LimitsConfig,

    /// Web UI settings
    pub server: ServerConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.sehat.sehat/config.toml
    /// - Linux: ~/.config/sehat/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\sehat\sehat\config\config.toml
    ///
    /// Falls back to ~/.sehat/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "sehat", "sehat")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".sehat").join("config.toml")
            })
    }

    /// Get the resolved example image directory (with ~ expansion).
    pub fn examples_dir(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.server.examples_dir);
        PathBuf::from(expanded.into_owned())
    }

    /// Upload size limit in bytes.
    pub fn max_upload_bytes(&self) -> u64 {
        self.limits.max_upload_size_mb.saturating_mul(1024 * 1024)
    }

    /// Resolve credentials and endpoint for the inference client.
    ///
    /// Missing values are kept as `None`; the client reports them per request.
    pub fn inference_settings(&self) -> InferenceSettings {
        InferenceSettings {
            api_key: resolve_env_var(&self.inference.api_key),
            api_base: resolve_env_var(&self.inference.api_base),
            timeout: Duration::from_millis(self.inference.timeout_ms),
        }
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Immutable client settings established once at process start.
#[derive(Debug, Clone, Default)]
pub struct InferenceSettings {
    /// API credential
    pub api_key: Option<String>,
    /// Base URL, e.g. `https://openrouter.ai/api/v1`
    pub api_base: Option<String>,
    /// Transport timeout for one call
    pub timeout: Duration,
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.trim().is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
