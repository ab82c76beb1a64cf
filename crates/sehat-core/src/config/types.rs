//! Sub-configuration structs with their defaults.

use crate::model::ModelId;
use serde::{Deserialize, Serialize};

/// Remote inference settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// API credential (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Base URL of the OpenAI-compatible API (supports ${ENV_VAR} syntax)
    pub api_base: String,

    /// Output token ceiling per analysis
    pub max_tokens: u32,

    /// Sampling temperature; near zero keeps answers stable
    pub temperature: f64,

    /// Transport timeout for one call, in milliseconds
    pub timeout_ms: u64,

    /// Model preselected in the UI and used by `sehat analyze`
    pub default_model: ModelId,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: "${API_KEY}".to_string(),
            api_base: "${API_BASE}".to_string(),
            max_tokens: 1000,
            temperature: 0.01,
            timeout_ms: 60_000,
            default_model: ModelId::default(),
        }
    }
}

/// Image normalization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Longest edge allowed in the transmitted image, in pixels
    pub max_dimension: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1024,
        }
    }
}

/// Resource limits to protect against problematic uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum upload size in megabytes
    pub max_upload_size_mb: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_size_mb: 20,
        }
    }
}

/// Web UI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Directory of example images offered as one-click inputs
    pub examples_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7860,
            examples_dir: "~/.sehat/examples".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
