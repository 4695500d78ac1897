//! Stateful chat completion sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::HearsayError;
use crate::transport::{bearer_headers, shared_client, status_to_error, trim_trailing_slash};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o";

/// Conversation role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A stateful completion collaborator, one call per loop iteration.
///
/// The seam exists so the interactive loop can be driven by mocks in tests.
#[async_trait]
pub trait CompletionSession: Send {
    /// Send one message and return the assistant's reply.
    async fn complete(&mut self, message: &str) -> Result<String, HearsayError>;
}

/// A conversation handle over `chat/completions`.
///
/// Holds the dialogue history; every `complete` call sends the full history
/// so the remote service sees monotonically growing context.
#[derive(Debug, Clone)]
pub struct ChatSession {
    api_key: String,
    base_url: String,
    model: String,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Create a session seeded with a system prompt.
    pub fn new(api_key: String, system_prompt: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            messages: vec![ChatMessage::system(system_prompt)],
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The accumulated conversation history, system prompt first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    async fn request_completion(&self) -> Result<String, HearsayError> {
        let wire_messages: Vec<serde_json::Value> = self
            .messages
            .iter()
            .map(|m| serde_json::json!({"role": m.role, "content": m.content}))
            .collect();
        let body = serde_json::json!({
            "model": self.model,
            "messages": wire_messages,
        });

        let url = format!("{}/chat/completions", trim_trailing_slash(&self.base_url));

        debug!(model = %self.model, turns = self.messages.len(), "chat completion");

        let response = shared_client()
            .post(url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body_text = response.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: ChatCompletionResponse = response.json().await?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| HearsayError::api(200, "No choices in completion response"))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

#[async_trait]
impl CompletionSession for ChatSession {
    async fn complete(&mut self, message: &str) -> Result<String, HearsayError> {
        self.messages.push(ChatMessage::user(message));

        let reply = match self.request_completion().await {
            Ok(reply) => reply,
            Err(e) => {
                // Drop the unanswered user message so the history stays
                // aligned with what the service has actually seen.
                self.messages.pop();
                return Err(e);
            }
        };

        self.messages.push(ChatMessage::assistant(reply.clone()));
        Ok(reply)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
