//! Chat-completion client with bounded retry
//!
//! Sends chat requests to an OpenAI-compatible endpoint. Transient
//! failures (timeouts, connection errors, HTTP 429 and 5xx) are retried
//! a bounded number of times with a fixed delay between attempts; other
//! failures surface immediately.

use crate::config::LlmConfig;
use crate::record::PaperRecord;
use crate::summarizer::{prompts, LlmError, API_KEY_ENV};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Creates a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for an OpenAI-compatible chat completion API
#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_retries: u32,
    retry_delay: Duration,
}

impl LlmClient {
    /// Creates a client with an explicit API key
    ///
    /// # Arguments
    ///
    /// * `config` - The LLM configuration
    /// * `api_key` - Bearer token for the API
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_retries: config.max_retries,
            retry_delay: Duration::from_secs(config.retry_delay_secs),
        })
    }

    /// Creates a client reading the API key from `LANTERN_API_KEY`
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| LlmError::MissingApiKey)?;
        Self::new(config, api_key)
    }

    /// Summarizes a crawled paper
    ///
    /// The prompt carries the title, abstract, and full-text sections
    /// when the record has them. The reply is the model's raw content,
    /// expected to be a JSON object in the three-part summary format.
    ///
    /// # Arguments
    ///
    /// * `record` - The paper to summarize
    pub async fn summarize_paper(&self, record: &PaperRecord) -> Result<String, LlmError> {
        let messages = [
            Message::system(prompts::SUMMARY_SYSTEM_PROMPT),
            Message::user(prompts::summary_user_prompt(record)),
        ];

        self.chat(&messages).await
    }

    /// Sends a chat completion request with bounded retry
    ///
    /// Timeouts, connection failures, HTTP 429 and 5xx responses are
    /// retried up to the configured attempt count, sleeping the
    /// configured delay between attempts. Any other failure surfaces
    /// immediately, as does the final attempt's error.
    ///
    /// # Arguments
    ///
    /// * `messages` - The conversation messages
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The assistant's reply content
    /// * `Err(LlmError)` - The request failed
    pub async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        let max_attempts = self.max_retries;

        for trial in 0..max_attempts {
            let last_attempt = trial + 1 == max_attempts;

            match self.send_once(messages).await {
                Ok(content) => return Ok(content),
                Err(error) => {
                    if last_attempt || !is_retryable(&error) {
                        return Err(error);
                    }

                    tracing::warn!(
                        "LLM request failed (attempt {}/{}): {}",
                        trial + 1,
                        max_attempts,
                        error
                    );
                }
            }

            tokio::time::sleep(self.retry_delay).await;
        }

        Err(LlmError::Exhausted {
            attempts: max_attempts,
        })
    }

    async fn send_once(&self, messages: &[Message]) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}

fn is_retryable(error: &LlmError) -> bool {
    match error {
        LlmError::Request(e) => e.is_timeout() || e.is_connect(),
        LlmError::Api { status, .. } => *status == 429 || (500..600).contains(status),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_trims_trailing_slash_from_api_base() {
        let config = LlmConfig {
            api_base: "http://127.0.0.1:9999/v1/".to_string(),
            ..LlmConfig::default()
        };

        let client = LlmClient::new(&config, "test-key").unwrap();
        assert_eq!(client.api_base, "http://127.0.0.1:9999/v1");
    }

    #[test]
    fn test_from_config_requires_api_key() {
        std::env::remove_var(API_KEY_ENV);

        let result = LlmClient::from_config(&LlmConfig::default());
        assert!(matches!(result, Err(LlmError::MissingApiKey)));
    }

    #[test]
    fn test_retryable_errors() {
        let rate_limited = LlmError::Api {
            status: 429,
            body: String::new(),
        };
        assert!(is_retryable(&rate_limited));

        let server_error = LlmError::Api {
            status: 503,
            body: String::new(),
        };
        assert!(is_retryable(&server_error));

        let bad_request = LlmError::Api {
            status: 400,
            body: String::new(),
        };
        assert!(!is_retryable(&bad_request));

        assert!(!is_retryable(&LlmError::EmptyResponse));
        assert!(!is_retryable(&LlmError::MissingApiKey));
    }

    #[test]
    fn test_message_constructors() {
        let system = Message::system("be brief");
        assert_eq!(system.role, "system");

        let user = Message::user("hello");
        assert_eq!(user.role, "user");
        assert_eq!(user.content, "hello");
    }

    // Retry behavior over live sockets is covered by the wiremock
    // integration tests.
}
