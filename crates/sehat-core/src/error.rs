//! Error types for Sehat.
//!
//! Errors are organized by stage so the orchestrator can turn any of them
//! into a single display string at the UI boundary while logs keep the
//! structured detail (stage, failure kind, HTTP status).

use std::fmt;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Failure of a single analysis, by stage.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The image could not be decoded, resized or re-encoded
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The remote inference call failed
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Image normalization errors.
#[derive(Error, Debug)]
pub enum EncodingError {
    /// Upload exceeds the configured size limit
    #[error("Image too large: {size_mb}MB > {max_mb}MB")]
    TooLarge { size_mb: u64, max_mb: u64 },

    /// Request body was cut off at the upload limit before the image was read
    #[error("Image too large: upload exceeds the {max_mb}MB limit")]
    UploadTooLarge { max_mb: u64 },

    /// Image has a zero width or height
    #[error("Image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// Input bytes could not be decoded as an image
    #[error("Cannot decode image: {0}")]
    Decode(String),

    /// Re-encoding to PNG failed
    #[error("Cannot encode image: {0}")]
    Encode(String),
}

/// Broad classification of an inference failure.
///
/// Logged for diagnosis; the end user sees only the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceErrorKind {
    /// Credential or endpoint missing or unusable
    Configuration,
    /// Provider rejected the credential (401/403)
    Authentication,
    /// Provider throttled the request (429)
    RateLimited,
    /// Any other non-success status from the provider
    Provider,
    /// Connection or transport failure
    Network,
    /// The call did not complete within the configured timeout
    Timeout,
    /// Response body could not be interpreted
    MalformedResponse,
}

impl fmt::Display for InferenceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::Authentication => "authentication",
            Self::RateLimited => "rate_limited",
            Self::Provider => "provider",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::MalformedResponse => "malformed_response",
        };
        f.write_str(name)
    }
}

/// A failed call to the remote chat-completion endpoint.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct InferenceError {
    pub kind: InferenceErrorKind,
    pub message: String,
    pub status_code: Option<u16>,
}

impl InferenceError {
    pub fn new(kind: InferenceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
        }
    }

    /// Classify a non-success HTTP status.
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let kind = match status_code {
            401 | 403 => InferenceErrorKind::Authentication,
            429 => InferenceErrorKind::RateLimited,
            _ => InferenceErrorKind::Provider,
        };
        Self {
            kind,
            message: message.into(),
            status_code: Some(status_code),
        }
    }
}
