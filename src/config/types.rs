use serde::Deserialize;

/// Main configuration structure for Paper-Lantern
///
/// Every section has working defaults, so the binary runs without a
/// configuration file; a TOML file and CLI flags override them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub fetch: FetchConfig,
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
    pub llm: LlmConfig,
}

/// Paper index location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the paper index
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://arxiv.org".to_string(),
        }
    }
}

/// HTTP fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Total request attempts per URL, including the first
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base delay between attempts in seconds; grows linearly per attempt
    #[serde(rename = "retry-delay-secs")]
    pub retry_delay_secs: u64,

    /// Overall request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay_secs: 15,
            timeout_secs: 30,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Maximum number of papers to take from a listing
    #[serde(rename = "max-papers")]
    pub max_papers: usize,

    /// Maximum number of detail pages fetched concurrently
    ///
    /// 1 crawls a listing strictly in sequence; higher values fetch in
    /// parallel while still returning records in listing order.
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_papers: 100,
            max_concurrent_fetches: 1,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding the record database
    #[serde(rename = "data-dir")]
    pub data_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: "./arxiv_data".to_string(),
        }
    }
}

/// Summarization endpoint configuration
///
/// The API key is never read from the file; it comes from the
/// `LANTERN_API_KEY` environment variable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API
    #[serde(rename = "api-base")]
    pub api_base: String,

    /// Model name to request
    pub model: String,

    /// Request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Total request attempts, including the first
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Fixed delay between attempts in seconds
    #[serde(rename = "retry-delay-secs")]
    pub retry_delay_secs: u64,

    /// Sampling temperature
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 10,
            max_retries: 3,
            retry_delay_secs: 1,
            temperature: 0.7,
        }
    }
}
