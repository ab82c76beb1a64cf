//! Inference client trait and request options.

use crate::error::InferenceError;
use crate::model::ModelId;
use crate::pipeline::EncodedPayload;
use async_trait::async_trait;

/// Generation parameters for one completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.01,
        }
    }
}

/// A single-shot multimodal completion against a remote model.
///
/// Uses `async_trait` so the orchestrator can hold `Arc<dyn InferenceClient>`.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Client name for logging.
    fn name(&self) -> &str;

    /// Send one user turn made of `prompt` and the image, return the first
    /// completion's text.
    async fn complete(
        &self,
        model: ModelId,
        payload: &EncodedPayload,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, InferenceError>;
}
