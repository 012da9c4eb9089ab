//! Crawler module for paper fetching and extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with bounded retry
//! - Listing page extraction (field listing to paper URLs)
//! - Detail page extraction (paper URL to record)
//! - Overall crawl orchestration with per-paper failure isolation

mod detail;
mod fetcher;
mod listing;
mod orchestrator;

pub use detail::{parse_detail, parse_sections, DetailExtractor, ParsedDetail};
pub use fetcher::{build_http_client, FetchError, Fetcher, RetryPolicy};
pub use listing::{parse_listing, ListingExtractor};
pub use orchestrator::{crawl_field, crawl_paper, CrawlOrchestrator};

use thiserror::Error;

/// Errors from the extraction stages
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A field the record cannot exist without was missing
    #[error("Missing {field} on {url}")]
    MissingField { url: String, field: &'static str },

    /// The paper URL could not be recognized
    #[error(transparent)]
    Url(#[from] crate::UrlError),
}
