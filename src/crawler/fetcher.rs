//! HTTP fetcher with bounded retry
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent and timeouts
//! - GET requests for listing, detail, and full-text pages
//! - Bounded retry with linearly escalating backoff
//! - Error classification (retryable vs. terminal)

use crate::config::FetchConfig;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Errors from a fetch operation
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection-level failure (refused, timeout, TLS, malformed request)
    #[error("Request failed for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    /// Non-retryable HTTP status, surfaced immediately
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Every attempt got a retryable failure status
    #[error("No successful response from {url} after {attempts} attempts")]
    Exhausted { url: String, attempts: u32 },
}

/// Retry behavior for transient fetch failures
///
/// A failure on zero-based attempt `trial` (when it is not the final attempt)
/// is followed by a sleep of `(trial + 1) * base_delay`:
///
/// | Failed attempt | Sleep before the next |
/// |----------------|-----------------------|
/// | 1st            | base_delay            |
/// | 2nd            | 2 * base_delay        |
/// | 3rd            | 3 * base_delay        |
///
/// Nothing sleeps after the final attempt. Retryable failures are request
/// timeouts, connection failures, HTTP 429, and HTTP 5xx; any other
/// non-success status fails immediately.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per URL, including the first
    pub max_attempts: u32,

    /// Base delay between attempts
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Returns the sleep duration after a failure on zero-based attempt `trial`
    pub fn backoff(&self, trial: u32) -> Duration {
        self.base_delay * (trial + 1)
    }

    /// Returns true when a failure status is worth another attempt
    pub fn is_retryable_status(&self, status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }

    /// Returns true when a transport error is worth another attempt
    pub fn is_retryable_transport(&self, error: &reqwest::Error) -> bool {
        error.is_timeout() || error.is_connect()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(15),
        }
    }
}

impl From<&FetchConfig> for RetryPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self {
            max_attempts: config.max_retries,
            base_delay: Duration::from_secs(config.retry_delay_secs),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(5))
        .gzip(true)
        .brotli(true)
        .build()
}

/// One logical GET with bounded retry
///
/// The fetcher is cheap to clone; clones share the underlying connection
/// pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Builds a fetcher directly from fetch configuration
    pub fn from_config(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?, RetryPolicy::from(config)))
    }

    /// Fetches a URL and returns its body text
    ///
    /// Each attempt is handled as follows:
    /// - success status: return the body
    /// - retryable status (429, 5xx): sleep per the policy and try again;
    ///   when attempts run out, fail with [`FetchError::Exhausted`]
    /// - other non-success status: fail immediately with [`FetchError::Status`]
    /// - timeout or connection failure, whether during the send or while
    ///   reading the body: sleep per the policy and try again; on the final
    ///   attempt the underlying error is surfaced as [`FetchError::Transport`]
    /// - any other transport error: fail immediately
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let max_attempts = self.policy.max_attempts;

        for trial in 0..max_attempts {
            let last_attempt = trial + 1 == max_attempts;

            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        // The request timeout keeps running while the body streams in
                        match response.text().await {
                            Ok(body) => return Ok(body),
                            Err(source) => {
                                if last_attempt
                                    || !self.policy.is_retryable_transport(&source)
                                {
                                    return Err(FetchError::Transport {
                                        url: url.to_string(),
                                        source,
                                    });
                                }

                                tracing::warn!(
                                    "Reading body from {} failed (attempt {}/{}): {}",
                                    url,
                                    trial + 1,
                                    max_attempts,
                                    source
                                );
                            }
                        }
                    } else if !self.policy.is_retryable_status(status) {
                        return Err(FetchError::Status {
                            url: url.to_string(),
                            status: status.as_u16(),
                        });
                    } else {
                        tracing::warn!(
                            "HTTP {} from {} (attempt {}/{})",
                            status.as_u16(),
                            url,
                            trial + 1,
                            max_attempts
                        );
                    }
                }
                Err(source) => {
                    if last_attempt || !self.policy.is_retryable_transport(&source) {
                        return Err(FetchError::Transport {
                            url: url.to_string(),
                            source,
                        });
                    }

                    tracing::warn!(
                        "Request to {} failed (attempt {}/{}): {}",
                        url,
                        trial + 1,
                        max_attempts,
                        source
                    );
                }
            }

            if !last_attempt {
                tokio::time::sleep(self.policy.backoff(trial)).await;
            }
        }

        Err(FetchError::Exhausted {
            url: url.to_string(),
            attempts: max_attempts,
        })
    }
}
