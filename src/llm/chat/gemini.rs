use async_trait::async_trait;
use log::info;
use serde::{ Deserialize, Serialize };
use std::error::Error as StdError;
use std::time::Duration;

use super::GenerativeClient;
use crate::cli::Args;
use crate::llm::{ GenerationParams, ProviderError, Turn };

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Deserialize)]
struct ResponseCandidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        timeout: Duration
    ) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        if api_key.is_empty() {
            return Err("Gemini API key is required for GeminiClient (set CHAT_API_KEY)".into());
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        })
    }

    pub fn from_args(args: &Args) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        Self::new(
            args.chat_api_key.clone(),
            args.chat_base_url.clone(),
            Duration::from_secs(args.request_timeout_secs)
        )
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            model,
            self.api_key
        )
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(
        &self,
        model: &str,
        turns: &[Turn],
        params: &GenerationParams
    ) -> Result<String, ProviderError> {
        let payload = GenerateRequest {
            contents: turns
                .iter()
                .map(|turn| Content {
                    role: turn.role.as_str(),
                    parts: vec![Part { text: &turn.text }],
                })
                .collect(),
            generation_config: GenerationConfig {
                max_output_tokens: params.max_output_tokens,
                temperature: params.temperature,
            },
        };

        info!("GeminiClient::generate() → model={} turns={}", model, turns.len());

        let resp = self.client
            .post(self.endpoint(model))
            .json(&payload)
            .send().await
            .map_err(|e| ProviderError::Transport {
                model: model.to_string(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let code = status.as_u16();
            if code == 429 || code == 503 || body.to_lowercase().contains("overloaded") {
                return Err(ProviderError::Overloaded {
                    model: model.to_string(),
                    status: code,
                    message: body,
                });
            }
            return Err(ProviderError::Api {
                model: model.to_string(),
                status: code,
                message: body,
            });
        }

        let body: GenerateResponse = resp
            .json().await
            .map_err(|e| ProviderError::Transport {
                model: model.to_string(),
                source: e,
            })?;

        body.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ProviderError::Empty { model: model.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_gemini_wire_format() {
        let payload = GenerateRequest {
            contents: vec![
                Content { role: "user", parts: vec![Part { text: "hello" }] },
                Content { role: "model", parts: vec![Part { text: "hi" }] }
            ],
            generation_config: GenerationConfig {
                max_output_tokens: 2000,
                temperature: 0.5,
            },
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2000);
        assert_eq!(json["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn response_text_extraction() {
        let body: GenerateResponse = serde_json
            ::from_str(r#"{"candidates":[{"content":{"parts":[{"text":" answer "}]}}]}"#)
            .unwrap();

        let text = body.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string());
        assert_eq!(text.as_deref(), Some("answer"));
    }

    #[test]
    fn empty_candidates_deserialize() {
        let body: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.candidates.is_empty());
    }
}
