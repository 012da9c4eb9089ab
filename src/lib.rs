//! Paper-Lantern: an arXiv-style paper harvester
//!
//! This crate crawls a paginated academic-paper index: it enumerates a subject
//! field's listing page, resolves each entry to its detail page, and extracts
//! title, comment, abstract, and (when an HTML rendering exists) sectioned full
//! text into uniform records. Records can be persisted to a keyed store and
//! summarized through an OpenAI-compatible endpoint.

pub mod config;
pub mod crawler;
pub mod record;
pub mod store;
pub mod summarizer;
pub mod urls;

use thiserror::Error;

/// Main error type for Paper-Lantern operations
#[derive(Debug, Error)]
pub enum LanternError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Extraction error: {0}")]
    Extract(#[from] crawler::ExtractError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Summarizer error: {0}")]
    Llm(#[from] summarizer::LlmError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for Paper-Lantern operations
pub type Result<T> = std::result::Result<T, LanternError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::CrawlOrchestrator;
pub use record::{PaperRecord, Section};
pub use urls::{canonical_paper_url, listing_url};
