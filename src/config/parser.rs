use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Keys omitted from the file keep their defaults, so a partial file is
/// valid.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use paper_lantern::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Index base: {}", config.source.base_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// This is logged at startup so crawl output can be traced back to the exact
/// configuration that produced it.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok((Config, String))` - Successfully loaded configuration and its hash
/// * `Err(ConfigError)` - Failed to load or parse the configuration
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[source]
base-url = "https://arxiv.org"

[fetch]
max-retries = 5
retry-delay-secs = 2
timeout-secs = 20
user-agent = "test-harvester/0.1"

[crawl]
max-papers = 50
max-concurrent-fetches = 4

[output]
data-dir = "./test_data"

[llm]
model = "test-model"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.source.base_url, "https://arxiv.org");
        assert_eq!(config.fetch.max_retries, 5);
        assert_eq!(config.crawl.max_papers, 50);
        assert_eq!(config.crawl.max_concurrent_fetches, 4);
        assert_eq!(config.output.data_dir, "./test_data");
        assert_eq!(config.llm.model, "test-model");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config_content = r#"
[crawl]
max-papers = 10
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawl.max_papers, 10);
        assert_eq!(config.crawl.max_concurrent_fetches, 1);
        assert_eq!(config.source.base_url, "https://arxiv.org");
        assert_eq!(config.fetch.max_retries, 3);
        assert_eq!(config.fetch.retry_delay_secs, 15);
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.output.data_dir, "./arxiv_data");
        assert_eq!(config.llm.max_retries, 3);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("[fetch\nmax-retries = ");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawl]
max-papers = 0
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_config_hash_is_stable() {
        let file = create_temp_config("[crawl]\nmax-papers = 7\n");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_config_hash_tracks_content() {
        let file1 = create_temp_config("[crawl]\nmax-papers = 7\n");
        let file2 = create_temp_config("[crawl]\nmax-papers = 8\n");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
