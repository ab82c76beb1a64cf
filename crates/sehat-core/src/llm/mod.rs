//! Remote vision-model integration.
//!
//! Provides the [`InferenceClient`] abstraction and an implementation for
//! OpenAI-compatible Chat Completions endpoints.

pub(crate) mod client;
pub(crate) mod openai;

pub use client::{CompletionOptions, InferenceClient};
pub use openai::OpenAiClient;
