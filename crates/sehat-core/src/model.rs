//! The fixed set of supported vision models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A remote model variant the analyzer may be asked to use.
///
/// Serialized as the provider's model identifier string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModelId {
    #[default]
    GeminiFlashExp,
    GeminiFlash,
    Qwen72bInstruct,
    Pixtral12bFree,
}

impl ModelId {
    /// All supported models, default first.
    pub const ALL: [ModelId; 4] = [
        ModelId::GeminiFlashExp,
        ModelId::GeminiFlash,
        ModelId::Qwen72bInstruct,
        ModelId::Pixtral12bFree,
    ];

    /// Identifier sent to the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::GeminiFlashExp => "google/gemini-flash-1.5-exp",
            ModelId::GeminiFlash => "google/gemini-flash-1.5",
            ModelId::Qwen72bInstruct => "qwen/qwen-2.5-72b-instruct",
            ModelId::Pixtral12bFree => "mistralai/pixtral-12b:free",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no supported model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported model: {0}")]
pub struct UnknownModel(pub String);

impl FromStr for ModelId {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ModelId::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}

impl TryFrom<String> for ModelId {
    type Error = UnknownModel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModelId> for String {
    fn from(model: ModelId) -> Self {
        model.as_str().to_string()
    }
}
