//! LLM Client — the single point of entry for chat-completion calls.
//!
//! No other module talks to the completion service directly. Callers depend on
//! the `CompletionService` trait so handlers and tests can swap the backend.
//!
//! Request parameters are fixed: one model, one token ceiling, and a low
//! temperature so repeated reviews of the same résumé read consistently.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
/// The model used for every review.
pub const MODEL: &str = "gpt-3.5-turbo";
pub const MAX_TOKENS: u32 = 1500;
pub const TEMPERATURE: f32 = 0.3;

/// Error code OpenAI returns alongside a 401 for a bad key.
const INVALID_API_KEY_CODE: &str = "invalid_api_key";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

impl LlmError {
    /// True when the failure looks like a credential problem.
    ///
    /// Uses the HTTP status and OpenAI error code when the service returned
    /// them. Otherwise falls back to matching "API key" in the message, which
    /// is a heuristic and can miss or misfire.
    pub fn is_auth_failure(&self) -> bool {
        if let LlmError::Api { status, code, .. } = self {
            if *status == StatusCode::UNAUTHORIZED.as_u16()
                || *status == StatusCode::FORBIDDEN.as_u16()
                || code.as_deref() == Some(INVALID_API_KEY_CODE)
            {
                return true;
            }
        }
        self.to_string().contains("API key")
    }
}

/// Completion-service credential. `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// A single user-turn request carrying the full prompt.
    pub fn single_turn(prompt: &'a str) -> Self {
        Self {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

/// Chat-completion response. Every field is optional on the way in so a
/// response that breaks the expected shape still deserializes and can be
/// reported as "no feedback".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

/// Treats an explicit `null` list the same as a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

/// Token accounting. Compatible endpoints often report only some fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Usage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

impl ChatResponse {
    /// Text of the first choice, if it carries non-empty content.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
    code: Option<String>,
}

/// Anything that turns a chat request into a chat response.
///
/// Carried in `AppState` as `Arc<dyn CompletionService>`.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(
        &self,
        api_key: &ApiKey,
        request: &ChatRequest<'_>,
    ) -> Result<ChatResponse, LlmError>;
}

/// HTTP client for the OpenAI chat-completions endpoint.
///
/// Holds no credential; the key arrives with each call. Uses the transport's
/// default timeout and never retries.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
}

impl LlmClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH)
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn complete(
        &self,
        api_key: &ApiKey,
        request: &ChatRequest<'_>,
    ) -> Result<ChatResponse, LlmError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (message, code) = match serde_json::from_str::<OpenAiError>(&body) {
                Ok(e) => (e.error.message, e.error.code),
                Err(_) => (body, None),
            };
            return Err(LlmError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "Completion call succeeded: prompt_tokens={:?}, completion_tokens={:?}, total_tokens={:?}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(chat_response)
    }
}
