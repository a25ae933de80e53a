pub mod chat;
pub mod fallback;

use thiserror::Error;

/// Role tag on a provider-bound conversation turn. The Gemini protocol has
/// no assistant role; assistant messages travel as `model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Model,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: TurnRole::User, text: text.into() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: TurnRole::Model, text: text.into() }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GenerationParams {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_output_tokens: 2000,
            temperature: 0.5,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Overload / rate-limit signal. The only class of failure worth trying
    /// the next candidate for.
    #[error("model '{model}' overloaded (status {status}): {message}")]
    Overloaded {
        model: String,
        status: u16,
        message: String,
    },

    #[error("model '{model}' rejected the request (status {status}): {message}")]
    Api {
        model: String,
        status: u16,
        message: String,
    },

    #[error("request to model '{model}' failed: {source}")]
    Transport {
        model: String,
        source: reqwest::Error,
    },

    #[error("model '{model}' returned no usable candidate text")]
    Empty {
        model: String,
    },
}

impl ProviderError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Overloaded { .. })
    }

    pub fn model(&self) -> &str {
        match self {
            ProviderError::Overloaded { model, .. } => model,
            ProviderError::Api { model, .. } => model,
            ProviderError::Transport { model, .. } => model,
            ProviderError::Empty { model } => model,
        }
    }
}
