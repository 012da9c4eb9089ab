//! Paper summarization through a chat-completion API
//!
//! This module talks to an OpenAI-compatible endpoint to produce
//! structured summaries of crawled papers. It contains:
//! - A chat client with bounded retry for transient API failures
//! - Prompt construction for the three-part summary format
//!
//! The API key is read from the `LANTERN_API_KEY` environment variable,
//! never from the configuration file.

mod client;
mod prompts;

pub use client::{LlmClient, Message};
pub use prompts::{summary_user_prompt, SUMMARY_SYSTEM_PROMPT};

use thiserror::Error;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "LANTERN_API_KEY";

/// Errors from the summarization client
#[derive(Debug, Error)]
pub enum LlmError {
    /// The API key environment variable is not set
    #[error("LANTERN_API_KEY is not set")]
    MissingApiKey,

    /// The request failed at the transport level, or the response body
    /// could not be decoded
    #[error("LLM request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a failure status
    #[error("LLM API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// The response carried no choices
    #[error("LLM returned an empty response")]
    EmptyResponse,

    /// Every attempt failed with a retryable error
    #[error("No LLM response after {attempts} attempts")]
    Exhausted { attempts: u32 },
}
