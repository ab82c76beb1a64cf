//! Client for OpenAI-compatible Chat Completions APIs.
//!
//! Sends the image via data URL in the user message content array.

use super::client::{CompletionOptions, InferenceClient};
use crate::config::InferenceSettings;
use crate::error::{InferenceError, InferenceErrorKind};
use crate::model::ModelId;
use crate::pipeline::EncodedPayload;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chat Completions client bound to one base URL and credential.
pub struct OpenAiClient {
    api_key: Option<String>,
    endpoint: Result<String, String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Build a client from settings resolved at startup.
    ///
    /// Missing or unusable settings don't fail here; every `complete` call
    /// reports them as a configuration error instead.
    pub fn new(settings: &InferenceSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            endpoint: completions_endpoint(settings.api_base.as_deref()),
            timeout: settings.timeout,
            client: reqwest::Client::new(),
        }
    }
}

fn completions_endpoint(api_base: Option<&str>) -> Result<String, String> {
    let base = api_base
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| "API base URL not set. Set the API_BASE env var.".to_string())?;

    let url = reqwest::Url::parse(base).map_err(|e| format!("Invalid API base URL '{base}': {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("Invalid API base URL '{base}': expected http or https"));
    }

    Ok(format!("{}/chat/completions", base.trim_end_matches('/')))
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ChatContent<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ChatContent<'a> {
    #[serde(rename = "text")]
    Text { text: &'a str },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn transport_error(e: reqwest::Error, timeout: Duration) -> InferenceError {
    if e.is_timeout() {
        InferenceError::new(
            InferenceErrorKind::Timeout,
            format!("Request timed out after {}ms", timeout.as_millis()),
        )
    } else {
        InferenceError::new(
            InferenceErrorKind::Network,
            format!("Request failed: {e}"),
        )
    }
}

#[async_trait]
impl InferenceClient for OpenAiClient {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    async fn complete(
        &self,
        model: ModelId,
        payload: &EncodedPayload,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, InferenceError> {
        let endpoint = self
            .endpoint
            .as_ref()
            .map_err(|msg| InferenceError::new(InferenceErrorKind::Configuration, msg.clone()))?;
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            InferenceError::new(
                InferenceErrorKind::Configuration,
                "API key not set. Set the API_KEY env var.",
            )
        })?;
        if payload.is_empty() {
            return Err(InferenceError::new(
                InferenceErrorKind::Configuration,
                "Refusing to send an empty image payload",
            ));
        }

        let body = ChatRequest {
            model: model.as_str(),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ChatContent::Text { text: prompt },
                    ChatContent::ImageUrl {
                        image_url: ImageUrl {
                            url: payload.data_url(),
                        },
                    },
                ],
            }],
        };

        let resp = self
            .client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(InferenceError::from_status(
                status.as_u16(),
                format!("HTTP {status}: {text}"),
            ));
        }

        let chat_resp: ChatResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(e, self.timeout)
            } else {
                InferenceError::new(
                    InferenceErrorKind::MalformedResponse,
                    format!("Failed to parse response: {e}"),
                )
            }
        })?;

        chat_resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                InferenceError::new(
                    InferenceErrorKind::MalformedResponse,
                    "Response contained no completion text",
                )
            })
    }
}
