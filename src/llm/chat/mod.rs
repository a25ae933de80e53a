pub mod gemini;

use async_trait::async_trait;
use std::error::Error as StdError;
use std::sync::Arc;

use super::{ GenerationParams, ProviderError, Turn };
use crate::cli::Args;
use self::gemini::GeminiClient;

/// One completion against a single named model. Fallback across candidate
/// models is the caller's concern, not the client's.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        turns: &[Turn],
        params: &GenerationParams
    ) -> Result<String, ProviderError>;
}

pub fn new_client(
    args: &Args
) -> Result<Arc<dyn GenerativeClient>, Box<dyn StdError + Send + Sync>> {
    let client = GeminiClient::from_args(args)?;
    Ok(Arc::new(client))
}
