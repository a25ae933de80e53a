use log::{ error, info, warn };
use thiserror::Error;

use super::chat::GenerativeClient;
use super::{ GenerationParams, ProviderError, Turn };

#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("no model candidates configured")]
    NoCandidates,

    /// Every candidate failed with a retryable signal; carries the last
    /// provider error for diagnostics.
    #[error("all {attempts} model candidates failed: {last}")]
    Exhausted {
        attempts: usize,
        #[source]
        last: ProviderError,
    },

    /// A candidate failed with a non-retryable error; remaining candidates
    /// were not attempted.
    #[error(transparent)]
    Fatal(#[from] ProviderError),
}

impl FallbackError {
    /// Provider-supplied detail message for the caller-visible error shape.
    pub fn detail(&self) -> String {
        match self {
            FallbackError::NoCandidates => self.to_string(),
            FallbackError::Exhausted { last, .. } => last.to_string(),
            FallbackError::Fatal(e) => e.to_string(),
        }
    }
}

enum FallbackState {
    Pending(usize),
    Done(String),
    Failed(FallbackError),
}

/// Try each candidate model in priority order until one succeeds.
///
/// Strictly sequential: one outstanding request at a time, first success
/// wins. A retryable failure advances to the next candidate; any other
/// failure aborts immediately.
pub async fn generate_with_fallback(
    client: &dyn GenerativeClient,
    candidates: &[String],
    turns: &[Turn],
    params: &GenerationParams
) -> Result<String, FallbackError> {
    let mut last_error: Option<ProviderError> = None;
    let mut state = FallbackState::Pending(0);

    loop {
        state = match state {
            FallbackState::Pending(index) => {
                let Some(model) = candidates.get(index) else {
                    break;
                };
                info!("Trying model candidate {}/{}: {}", index + 1, candidates.len(), model);
                match client.generate(model, turns, params).await {
                    Ok(text) => {
                        info!("Model '{}' succeeded", model);
                        FallbackState::Done(text)
                    }
                    Err(err) if err.is_retryable() => {
                        warn!("Model '{}' unavailable, advancing to next candidate: {}", model, err);
                        last_error = Some(err);
                        FallbackState::Pending(index + 1)
                    }
                    Err(err) => {
                        error!("Model '{}' failed: {}", model, err);
                        FallbackState::Failed(FallbackError::Fatal(err))
                    }
                }
            }
            FallbackState::Done(text) => {
                return Ok(text);
            }
            FallbackState::Failed(err) => {
                return Err(err);
            }
        };
    }

    Err(match last_error {
        Some(last) =>
            FallbackError::Exhausted {
                attempts: candidates.len(),
                last,
            },
        None => FallbackError::NoCandidates,
    })
}
