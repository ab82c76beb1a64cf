//! Sehat Core - nutrition analysis of food photos via remote vision models.
//!
//! Sehat takes a photo of a product label, food item, or menu, normalizes it
//! into a bounded PNG payload, and asks a multimodal chat-completion model
//! for a plain-language nutritional description.
//!
//! # Architecture
//!
//! ```text
//! Upload → Decode → Downscale (≤1024px) → base64 PNG → Chat Completion → Text
//! ```
//!
//! The core has no UI dependencies. [`Analyzer::analyze`] is the single entry
//! point and always returns display text, never an error.
//!
//! # Usage
//!
//! ```rust,no_run
//! use sehat_core::{Analyzer, Config, ModelId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let analyzer = Analyzer::from_config(&config);
//!
//!     let bytes = std::fs::read("./label.jpg")?;
//!     let result = analyzer.analyze_bytes(Some(bytes), ModelId::default()).await;
//!     println!("{result}");
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod analysis;
pub mod config;
pub mod error;
pub mod llm;
pub mod model;
pub mod pipeline;

// Re-exports for convenient access
pub use analysis::{AnalysisResult, Analyzer, ANALYSIS_PROMPT, ERROR_PREFIX, GUIDANCE_MESSAGE};
pub use config::{Config, InferenceSettings};
pub use error::{AnalysisError, ConfigError, EncodingError, InferenceError, InferenceErrorKind};
pub use llm::{CompletionOptions, InferenceClient, OpenAiClient};
pub use model::{ModelId, UnknownModel};
pub use pipeline::{EncodedPayload, ImageDecoder, ImagePreprocessor};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[tokio::test]
    async fn test_analyzer_from_config_without_credentials() {
        let mut config = Config::default();
        config.inference.api_key = String::new();
        config.inference.api_base = String::new();
        let analyzer = Analyzer::from_config(&config);

        let result = analyzer.analyze(None, ModelId::default()).await;
        assert_eq!(result, AnalysisResult::Guidance);

        let image = image::DynamicImage::new_rgb8(16, 16);
        let result = analyzer.analyze(Some(image), ModelId::default()).await;
        assert!(result.text().starts_with(ERROR_PREFIX));
        assert!(result.text().contains("API_BASE"));
    }
}
