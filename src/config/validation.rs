use crate::config::types::{Config, CrawlConfig, FetchConfig, LlmConfig, OutputConfig, SourceConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_fetch_config(&config.fetch)?;
    validate_crawl_config(&config.crawl)?;
    validate_output_config(&config.output)?;
    validate_llm_config(&config.llm)?;
    Ok(())
}

/// Validates the paper index location
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    // HTTP is accepted alongside HTTPS so tests can point at local mock servers
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use HTTP or HTTPS, got '{}'",
            url.scheme()
        )));
    }

    Ok(())
}

/// Validates fetch behavior configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch max-retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "fetch user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawl behavior configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_papers < 1 {
        return Err(ConfigError::Validation(format!(
            "crawl max-papers must be >= 1, got {}",
            config.max_papers
        )));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "crawl max-concurrent-fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output data-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates summarization endpoint configuration
fn validate_llm_config(config: &LlmConfig) -> Result<(), ConfigError> {
    Url::parse(&config.api_base)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid llm api-base: {}", e)))?;

    if config.model.is_empty() {
        return Err(ConfigError::Validation(
            "llm model cannot be empty".to_string(),
        ));
    }

    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "llm max-retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ConfigError::Validation(format!(
            "llm temperature must be between 0.0 and 2.0, got {}",
            config.temperature
        )));
    }

    Ok(())
}
