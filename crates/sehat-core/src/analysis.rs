//! Analysis orchestration: the single boundary between a UI submission and
//! the remote model.
//!
//! [`Analyzer::analyze`] never fails. Every outcome, including a missing
//! image, is turned into an [`AnalysisResult`] carrying display text, so
//! callers can render it without any error handling of their own.

use crate::config::Config;
use crate::error::{AnalysisError, EncodingError};
use crate::llm::{CompletionOptions, InferenceClient, OpenAiClient};
use crate::model::ModelId;
use crate::pipeline::{ImageDecoder, ImagePreprocessor};
use image::DynamicImage;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Shown when a submission carries no image.
pub const GUIDANCE_MESSAGE: &str = "Please upload an image of a product label, food item, or menu.";

/// Prefix that marks a result as a failure.
pub const ERROR_PREFIX: &str = "Error analyzing image: ";

/// Instruction sent alongside every image.
pub const ANALYSIS_PROMPT: &str = "Analyze this image of a product label, food item, or menu. \
Provide a simple description of the product and its nutritional information, \
(for images of food / fruits / dishes / always give approximate calorie values in number \
with disclaimer that it's generic and it may vary), \
consider user as if talking to someone with no nutritional background.";

/// Outcome of one submission. Exactly one variant, always with text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResult {
    /// No image was supplied
    Guidance,
    /// The model's analysis, verbatim
    Analysis(String),
    /// A failure rendered for display, starting with [`ERROR_PREFIX`]
    Error(String),
}

impl AnalysisResult {
    /// Text to show in the output control.
    pub fn text(&self) -> &str {
        match self {
            AnalysisResult::Guidance => GUIDANCE_MESSAGE,
            AnalysisResult::Analysis(text) | AnalysisResult::Error(text) => text,
        }
    }

    /// Short machine-readable label for the outcome.
    pub fn status(&self) -> &'static str {
        match self {
            AnalysisResult::Guidance => "guidance",
            AnalysisResult::Analysis(_) => "analysis",
            AnalysisResult::Error(_) => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisResult::Error(_))
    }
}

impl From<AnalysisError> for AnalysisResult {
    fn from(err: AnalysisError) -> Self {
        AnalysisResult::Error(format!("{ERROR_PREFIX}{err}"))
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Coordinates decoding, preprocessing, and the inference call.
///
/// Holds no per-request state; one instance can serve concurrent requests.
#[derive(Clone)]
pub struct Analyzer {
    decoder: ImageDecoder,
    preprocessor: ImagePreprocessor,
    client: Arc<dyn InferenceClient>,
    options: CompletionOptions,
}

impl Analyzer {
    pub fn new(
        decoder: ImageDecoder,
        preprocessor: ImagePreprocessor,
        client: Arc<dyn InferenceClient>,
        options: CompletionOptions,
    ) -> Self {
        Self {
            decoder,
            preprocessor,
            client,
            options,
        }
    }

    /// Build an analyzer backed by the OpenAI-compatible client.
    pub fn from_config(config: &Config) -> Self {
        let settings = config.inference_settings();
        Self::new(
            ImageDecoder::new(config.max_upload_bytes()),
            ImagePreprocessor::new(config.preprocess.clone()),
            Arc::new(OpenAiClient::new(&settings)),
            CompletionOptions {
                max_tokens: config.inference.max_tokens,
                temperature: config.inference.temperature as f32,
            },
        )
    }

    /// Analyze an optional image with the given model.
    pub async fn analyze(&self, image: Option<DynamicImage>, model: ModelId) -> AnalysisResult {
        let Some(image) = image else {
            tracing::debug!("No image supplied, returning guidance");
            return AnalysisResult::Guidance;
        };

        match self.run(image, model).await {
            Ok(text) => AnalysisResult::Analysis(text),
            Err(err) => {
                match &err {
                    AnalysisError::Encoding(e) => tracing::warn!("Image encoding failed: {e}"),
                    AnalysisError::Inference(e) => tracing::warn!(
                        kind = %e.kind,
                        status = ?e.status_code,
                        "Inference via {} failed: {e}",
                        self.client.name()
                    ),
                }
                err.into()
            }
        }
    }

    /// Decode raw upload bytes, then analyze.
    ///
    /// Empty or missing bytes count as no image; undecodable bytes become an
    /// error result.
    pub async fn analyze_bytes(&self, bytes: Option<Vec<u8>>, model: ModelId) -> AnalysisResult {
        match self.decoder.decode_upload(bytes).await {
            Ok(image) => self.analyze(image, model).await,
            Err(e) => {
                tracing::warn!("Upload decoding failed: {e}");
                AnalysisError::from(e).into()
            }
        }
    }

    async fn run(&self, image: DynamicImage, model: ModelId) -> Result<String, AnalysisError> {
        let preprocessor = self.preprocessor.clone();
        let payload = tokio::task::spawn_blocking(move || preprocessor.encode(image))
            .await
            .map_err(|e| EncodingError::Encode(format!("Task join error: {e}")))??;

        let start = Instant::now();
        let text = self
            .client
            .complete(model, &payload, ANALYSIS_PROMPT, &self.options)
            .await?;

        tracing::info!(
            model = %model,
            width = payload.width,
            height = payload.height,
            latency_ms = start.elapsed().as_millis() as u64,
            "Analysis complete"
        );
        Ok(text)
    }
}
