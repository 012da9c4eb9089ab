//! Store trait and error types
//!
//! This module defines the trait interface for record stores and the
//! associated error types.

use crate::record::PaperRecord;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for paper record stores
///
/// Records are keyed by their canonical URL: writing a record for a URL
/// that already exists replaces the old record, so re-crawling a paper
/// never duplicates it.
pub trait Store {
    /// Inserts a record, replacing any existing record with the same URL
    fn upsert_paper(&mut self, record: &PaperRecord) -> StoreResult<()>;

    /// Gets a record by its canonical URL
    fn get_paper(&self, url: &str) -> StoreResult<Option<PaperRecord>>;

    /// Lists all stored records, most recently crawled first
    fn list_papers(&self) -> StoreResult<Vec<PaperRecord>>;

    /// Returns the number of stored records
    fn count_papers(&self) -> StoreResult<usize>;

    /// Inserts a batch of records
    ///
    /// # Returns
    ///
    /// The number of records written
    fn upsert_papers(&mut self, records: &[PaperRecord]) -> StoreResult<usize> {
        for record in records {
            self.upsert_paper(record)?;
        }
        Ok(records.len())
    }
}
