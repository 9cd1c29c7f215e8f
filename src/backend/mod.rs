pub(crate) mod anthropic;
pub(crate) mod gemini;

use serde::Deserialize;
use strum::{Display, EnumString};

use crate::config::BackendSettings;
use crate::error::InterviewError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackendKind {
    Anthropic,
    Gemini,
}

impl BackendKind {
    /// Environment variable holding this backend's API key.
    pub fn env_var(self) -> &'static str {
        match self {
            BackendKind::Anthropic => "ANTHROPIC_API_KEY",
            BackendKind::Gemini => "GOOGLE_API_KEY",
        }
    }
}

/// A text-generation service that turns one instruction into one block of text.
pub trait GenerationBackend {
    fn kind(&self) -> BackendKind;

    async fn generate(&self, payload: &str, credential: &str) -> Result<String, InterviewError>;
}

pub enum Backend {
    Anthropic(anthropic::AnthropicBackend),
    Gemini(gemini::GeminiBackend),
}

impl Backend {
    pub fn new(kind: BackendKind, settings: &BackendSettings) -> Self {
        match kind {
            BackendKind::Anthropic => Backend::Anthropic(anthropic::AnthropicBackend::new(settings)),
            BackendKind::Gemini => Backend::Gemini(gemini::GeminiBackend::new(settings)),
        }
    }
}

impl GenerationBackend for Backend {
    fn kind(&self) -> BackendKind {
        match self {
            Backend::Anthropic(_) => BackendKind::Anthropic,
            Backend::Gemini(_) => BackendKind::Gemini,
        }
    }

    async fn generate(&self, payload: &str, credential: &str) -> Result<String, InterviewError> {
        let result = match self {
            Backend::Anthropic(backend) => backend.complete(payload, credential).await,
            Backend::Gemini(backend) => backend.complete(payload, credential).await,
        };

        result.map_err(|error| InterviewError::Generation(format!("{error:#}")))
    }
}
