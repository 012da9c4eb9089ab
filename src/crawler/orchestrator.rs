//! Crawl orchestration
//!
//! This module coordinates the two-stage crawl:
//! 1. Fetch a field's listing page and extract paper URLs
//! 2. Crawl each paper's detail page, sequentially or with bounded
//!    concurrency
//!
//! One paper failing never aborts the crawl. Failed papers are logged
//! and skipped, so a listing of K papers with one unreachable entry
//! still yields K-1 records, in listing order.

use crate::config::Config;
use crate::crawler::{DetailExtractor, ExtractError, Fetcher, ListingExtractor};
use crate::record::PaperRecord;
use crate::{ConfigError, LanternError};
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// Coordinates listing and detail extraction for a crawl
#[derive(Debug, Clone)]
pub struct CrawlOrchestrator {
    listing: ListingExtractor,
    detail: DetailExtractor,
    max_concurrent_fetches: usize,
}

impl CrawlOrchestrator {
    pub fn new(
        listing: ListingExtractor,
        detail: DetailExtractor,
        max_concurrent_fetches: usize,
    ) -> Self {
        Self {
            listing,
            detail,
            max_concurrent_fetches,
        }
    }

    /// Builds an orchestrator from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOrchestrator)` - Ready to crawl
    /// * `Err(LanternError)` - Bad base URL or HTTP client failure
    pub fn from_config(config: &Config) -> Result<Self, LanternError> {
        let base_url = Url::parse(&config.source.base_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("{}: {}", config.source.base_url, e))
        })?;

        let fetcher = Fetcher::from_config(&config.fetch)?;

        Ok(Self::new(
            ListingExtractor::new(fetcher.clone(), base_url.clone()),
            DetailExtractor::new(fetcher, base_url),
            config.crawl.max_concurrent_fetches,
        ))
    }

    /// Crawls a single paper by URL
    pub async fn crawl_paper(&self, url: &str) -> Result<PaperRecord, ExtractError> {
        self.detail.extract(url).await
    }

    /// Crawls the recent submissions for a field
    ///
    /// A listing failure aborts the crawl, since there is nothing to
    /// iterate. Individual paper failures cost one record each.
    ///
    /// # Arguments
    ///
    /// * `field` - The subject field identifier (e.g. "cs.AI")
    /// * `max_papers` - Upper bound on papers to crawl
    ///
    /// # Returns
    ///
    /// Records for every paper that crawled cleanly, in listing order
    pub async fn crawl_field(
        &self,
        field: &str,
        max_papers: usize,
    ) -> Result<Vec<PaperRecord>, ExtractError> {
        let paper_urls = self.listing.extract(field, max_papers).await?;
        let attempted = paper_urls.len();

        let records = if self.max_concurrent_fetches > 1 {
            self.crawl_parallel(paper_urls).await
        } else {
            self.crawl_sequential(paper_urls).await
        };

        tracing::info!(
            "Crawled {} of {} papers from {}",
            records.len(),
            attempted,
            field
        );

        Ok(records)
    }

    async fn crawl_sequential(&self, paper_urls: Vec<String>) -> Vec<PaperRecord> {
        let mut records = Vec::with_capacity(paper_urls.len());

        for url in paper_urls {
            match self.detail.extract(&url).await {
                Ok(record) => records.push(record),
                Err(error) => {
                    tracing::warn!("Skipping {}: {}", url, error);
                }
            }
        }

        records
    }

    async fn crawl_parallel(&self, paper_urls: Vec<String>) -> Vec<PaperRecord> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_fetches));
        let mut handles = Vec::with_capacity(paper_urls.len());

        for url in paper_urls {
            let semaphore = Arc::clone(&semaphore);
            let detail = self.detail.clone();

            handles.push(tokio::spawn(async move {
                // The semaphore is never closed, so acquire cannot fail
                let _permit = semaphore.acquire().await.ok();
                detail.extract(&url).await.map_err(|error| (url, error))
            }));
        }

        // Awaiting handles in spawn order keeps records in listing order
        let mut records = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(Ok(record)) => records.push(record),
                Ok(Err((url, error))) => {
                    tracing::warn!("Skipping {}: {}", url, error);
                }
                Err(join_error) => {
                    tracing::warn!("Crawl task failed: {}", join_error);
                }
            }
        }

        records
    }
}

/// Crawls the recent submissions for one field
///
/// This is the top-level entry point for a field crawl:
///
/// 1. Build the HTTP client and extractors from configuration
/// 2. Fetch the field's listing page
/// 3. Crawl every listed paper, skipping any that fail
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `field` - The subject field identifier
///
/// # Returns
///
/// * `Ok(Vec<PaperRecord>)` - Records in listing order
/// * `Err(LanternError)` - Setup or listing fetch failed
///
/// # Example
///
/// ```no_run
/// use paper_lantern::config::load_config;
/// use paper_lantern::crawler::crawl_field;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let records = crawl_field(&config, "cs.AI").await?;
/// println!("Crawled {} papers", records.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl_field(config: &Config, field: &str) -> Result<Vec<PaperRecord>, LanternError> {
    let orchestrator = CrawlOrchestrator::from_config(config)?;
    let records = orchestrator
        .crawl_field(field, config.crawl.max_papers)
        .await?;
    Ok(records)
}

/// Crawls a single paper by URL
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `url` - The paper's detail page URL
///
/// # Returns
///
/// * `Ok(PaperRecord)` - The assembled record
/// * `Err(LanternError)` - Setup, fetch, or extraction failed
pub async fn crawl_paper(config: &Config, url: &str) -> Result<PaperRecord, LanternError> {
    let orchestrator = CrawlOrchestrator::from_config(config)?;
    let record = orchestrator.crawl_paper(url).await?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orchestrator_from_default_config() {
        let config = Config::default();
        let orchestrator = CrawlOrchestrator::from_config(&config);
        assert!(orchestrator.is_ok());
    }

    #[test]
    fn test_from_config_rejects_bad_base_url() {
        let mut config = Config::default();
        config.source.base_url = "not a url".to_string();

        let result = CrawlOrchestrator::from_config(&config);
        assert!(matches!(
            result,
            Err(LanternError::Config(ConfigError::InvalidUrl(_)))
        ));
    }

    // Crawl behavior over live sockets is covered by the wiremock
    // integration tests.
}
