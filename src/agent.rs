use crate::cli::Args;
use crate::knowledge::relevant_knowledge;
use crate::llm::chat::{ new_client, GenerativeClient };
use crate::llm::fallback::{ generate_with_fallback, FallbackError };
use crate::llm::{ GenerationParams, Turn, TurnRole };
use crate::models::chat::{ ChatMessage, ChatRequest, ChatResponse };
use crate::prompt::{ build_system_prompt, off_topic_response, PRIMING_ACK };
use crate::topic::{ classify, Topic };

use chrono::Utc;
use log::info;
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Message is required")]
    MissingMessage,

    #[error("Chat failed: {0}")]
    Completion(#[from] FallbackError),
}

/// Per-request chat pipeline: topic gate, knowledge lookup, prompt
/// assembly, model invocation with fallback. Holds no per-conversation
/// state; history arrives with each request.
#[derive(Clone)]
pub struct ChatAgent {
    client: Arc<dyn GenerativeClient>,
    candidates: Vec<String>,
    params: GenerationParams,
}

impl ChatAgent {
    pub fn new(args: &Args) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let candidates = args.model_candidates();
        if candidates.is_empty() {
            return Err("at least one chat model candidate is required (CHAT_MODELS)".into());
        }

        let client = new_client(args)?;

        Ok(Self {
            client,
            candidates,
            params: GenerationParams {
                max_output_tokens: args.max_output_tokens,
                temperature: args.temperature,
            },
        })
    }

    /// Build an agent around an externally supplied client. The seam the
    /// tests script fake providers through.
    pub fn with_client(
        client: Arc<dyn GenerativeClient>,
        candidates: Vec<String>,
        params: GenerationParams
    ) -> Self {
        Self { client, candidates, params }
    }

    pub async fn handle_chat(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        if request.message.trim().is_empty() {
            return Err(ChatError::MissingMessage);
        }

        let conversation_id = request.conversation_id
            .clone()
            .unwrap_or_else(|| Utc::now().timestamp_millis().to_string());

        if classify(&request.message) == Topic::OffTopic {
            info!("Off-topic message blocked before any model call");
            return Ok(ChatResponse {
                message: off_topic_response(request.language).to_string(),
                conversation_id,
            });
        }

        let knowledge = relevant_knowledge(&request.message);
        let system_prompt = build_system_prompt(&knowledge, request.language);
        let turns = assemble_turns(&system_prompt, &request.history, &request.message);

        let reply = generate_with_fallback(
            self.client.as_ref(),
            &self.candidates,
            &turns,
            &self.params
        ).await?;

        Ok(ChatResponse {
            message: reply,
            conversation_id,
        })
    }
}

/// Turn list sent to the provider: priming pair carrying the system
/// prompt, then the caller's history, then the new user message.
fn assemble_turns(system_prompt: &str, history: &[ChatMessage], message: &str) -> Vec<Turn> {
    let mut history_turns: Vec<Turn> = history
        .iter()
        .map(|msg| {
            if msg.role == "assistant" {
                Turn::model(msg.content.clone())
            } else {
                Turn::user(msg.content.clone())
            }
        })
        .collect();

    // The provider requires history to open with a user turn.
    if history_turns.first().map(|t| t.role) == Some(TurnRole::Model) {
        history_turns.remove(0);
    }

    let mut turns = Vec::with_capacity(history_turns.len() + 3);
    turns.push(Turn::user(system_prompt));
    turns.push(Turn::model(PRIMING_ACK));
    turns.extend(history_turns);
    turns.push(Turn::user(message));
    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::llm::ProviderError;
    use crate::models::chat::Language;
    use std::sync::Mutex;
    use std::sync::atomic::{ AtomicUsize, Ordering };

    /// Fake provider recording every call's turns and answering with a
    /// fixed reply.
    struct CapturingClient {
        reply: &'static str,
        calls: AtomicUsize,
        seen_turns: Mutex<Vec<Vec<Turn>>>,
    }

    impl CapturingClient {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                seen_turns: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerativeClient for CapturingClient {
        async fn generate(
            &self,
            _model: &str,
            turns: &[Turn],
            _params: &GenerationParams
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_turns.lock().unwrap().push(turns.to_vec());
            Ok(self.reply.to_string())
        }
    }

    fn agent_with(client: Arc<CapturingClient>) -> ChatAgent {
        ChatAgent::with_client(
            client,
            vec!["model-a".into(), "model-b".into()],
            GenerationParams::default()
        )
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.into(),
            history: Vec::new(),
            language: Language::Taglish,
            conversation_id: None,
        }
    }

    #[tokio::test]
    async fn greeting_reaches_the_model() {
        let client = Arc::new(CapturingClient::new("Hello po! How can I help with malunggay?"));
        let agent = agent_with(client.clone());

        let resp = agent.handle_chat(request("hi")).await.unwrap();
        assert_eq!(resp.message, "Hello po! How can I help with malunggay?");
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn off_topic_message_gets_canned_reply_without_model_call() {
        let client = Arc::new(CapturingClient::new("should never be seen"));
        let agent = agent_with(client.clone());

        let resp = agent
            .handle_chat(request("who is the president of the country")).await
            .unwrap();
        assert_eq!(
            resp.message,
            off_topic_response(Language::Taglish)
        );
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_model_call() {
        let client = Arc::new(CapturingClient::new("unused"));
        let agent = agent_with(client.clone());

        let err = agent.handle_chat(request("")).await.unwrap_err();
        assert!(matches!(err, ChatError::MissingMessage));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn tagalog_pricing_question_grounds_prompt_and_language() {
        let client = Arc::new(CapturingClient::new("Nasa ₱50-80 po ang presyo."));
        let agent = agent_with(client.clone());

        let mut req = request("magkano presyo ng malunggay");
        req.language = Language::Tagalog;
        agent.handle_chat(req).await.unwrap();

        let seen = client.seen_turns.lock().unwrap();
        let turns = &seen[0];
        // Priming pair first, then the user message last.
        assert_eq!(turns[0].role, TurnRole::User);
        assert!(turns[0].text.contains("PRICES:"));
        assert!(turns[0].text.contains("Respond ONLY in Filipino/Tagalog"));
        assert_eq!(turns[1].text, PRIMING_ACK);
        assert_eq!(turns.last().unwrap().text, "magkano presyo ng malunggay");
    }

    #[tokio::test]
    async fn conversation_id_is_echoed_when_supplied() {
        let client = Arc::new(CapturingClient::new("ok"));
        let agent = agent_with(client);

        let mut req = request("hi");
        req.conversation_id = Some("conv-42".into());
        let resp = agent.handle_chat(req).await.unwrap();
        assert_eq!(resp.conversation_id, "conv-42");
    }

    #[tokio::test]
    async fn generated_conversation_id_is_numeric_timestamp() {
        let client = Arc::new(CapturingClient::new("ok"));
        let agent = agent_with(client);

        let resp = agent.handle_chat(request("hi")).await.unwrap();
        assert!(!resp.conversation_id.is_empty());
        assert!(resp.conversation_id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn leading_assistant_history_is_dropped() {
        let history = vec![
            ChatMessage { role: "assistant".into(), content: "stale greeting".into() },
            ChatMessage { role: "user".into(), content: "earlier question".into() },
            ChatMessage { role: "assistant".into(), content: "earlier answer".into() }
        ];

        let turns = assemble_turns("SYSTEM", &history, "new question");

        assert_eq!(turns[0].text, "SYSTEM");
        assert_eq!(turns[1].text, PRIMING_ACK);
        // The stale leading assistant turn is gone; history resumes with
        // the user turn.
        assert_eq!(turns[2], Turn::user("earlier question"));
        assert_eq!(turns[3], Turn::model("earlier answer"));
        assert_eq!(turns[4], Turn::user("new question"));
        assert_eq!(turns.len(), 5);
    }
}
