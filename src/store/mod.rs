//! Storage layer for crawled paper records
//!
//! Records are kept in SQLite, keyed by canonical paper URL, so
//! re-crawling a paper replaces its previous record instead of
//! duplicating it.

mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{Store, StoreError, StoreResult};

use crate::config::OutputConfig;
use std::path::Path;

/// Database file name inside the data directory
const STORE_FILE_NAME: &str = "papers.db";

/// Opens the paper store inside the configured data directory
///
/// The data directory is created when missing. The database lives at
/// `<data-dir>/papers.db`.
///
/// # Arguments
///
/// * `config` - The output configuration
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Ready for reads and writes
/// * `Err(StoreError)` - Directory creation or database open failed
pub fn open_store(config: &OutputConfig) -> Result<SqliteStore, StoreError> {
    std::fs::create_dir_all(&config.data_dir)?;
    let path = Path::new(&config.data_dir).join(STORE_FILE_NAME);
    SqliteStore::new(&path)
}
