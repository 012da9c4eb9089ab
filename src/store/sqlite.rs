//! SQLite store implementation
//!
//! This module provides a SQLite-based implementation of the Store trait.
//! Records are serialized to JSON and kept in a single table keyed by
//! canonical paper URL.

use crate::record::PaperRecord;
use crate::store::traits::{Store, StoreError, StoreResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite store backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates the store at the given path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(StoreError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory store (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn initialize_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS papers (
            url        TEXT PRIMARY KEY,
            title      TEXT NOT NULL,
            record     TEXT NOT NULL,
            crawled_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_papers_crawled_at ON papers (crawled_at);
    ",
    )
}

impl Store for SqliteStore {
    fn upsert_paper(&mut self, record: &PaperRecord) -> StoreResult<()> {
        let json = serde_json::to_string(record)?;
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO papers (url, title, record, crawled_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(url) DO UPDATE SET
                 title = excluded.title,
                 record = excluded.record,
                 crawled_at = excluded.crawled_at",
            params![record.url, record.title, json, now],
        )?;

        Ok(())
    }

    fn get_paper(&self, url: &str) -> StoreResult<Option<PaperRecord>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT record FROM papers WHERE url = ?1",
                params![url],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn list_papers(&self) -> StoreResult<Vec<PaperRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT record FROM papers ORDER BY crawled_at DESC, url ASC")?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(serde_json::from_str(&row?)?);
        }

        Ok(records)
    }

    fn count_papers(&self) -> StoreResult<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM papers", [], |row| row.get(0))?;

        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Section;
    use std::collections::BTreeMap;

    fn sample_record(url: &str, title: &str) -> PaperRecord {
        PaperRecord {
            url: url.to_string(),
            title: title.to_string(),
            comment: "12 pages".to_string(),
            abstract_text: Some("An abstract.".to_string()),
            full_content: None,
        }
    }

    #[test]
    fn test_upsert_and_get_roundtrip() {
        let mut store = SqliteStore::new_in_memory().unwrap();

        let mut sections = BTreeMap::new();
        sections.insert(
            "S1".to_string(),
            Section {
                title: "Introduction".to_string(),
                content: "First.\nSecond.".to_string(),
            },
        );

        let mut record = sample_record("https://arxiv.org/abs/2401.00001", "A Paper");
        record.full_content = Some(sections);

        store.upsert_paper(&record).unwrap();

        let loaded = store
            .get_paper("https://arxiv.org/abs/2401.00001")
            .unwrap()
            .unwrap();
        assert_eq!(loaded.title, "A Paper");
        assert_eq!(loaded.comment, "12 pages");
        assert_eq!(loaded.abstract_text, Some("An abstract.".to_string()));
        assert_eq!(
            loaded.full_content.unwrap()["S1"].content,
            "First.\nSecond."
        );
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = SqliteStore::new_in_memory().unwrap();
        let loaded = store.get_paper("https://arxiv.org/abs/none").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_upsert_replaces_existing_record() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        let url = "https://arxiv.org/abs/2401.00001";

        store.upsert_paper(&sample_record(url, "First Title")).unwrap();
        store.upsert_paper(&sample_record(url, "Revised Title")).unwrap();

        assert_eq!(store.count_papers().unwrap(), 1);
        assert_eq!(store.get_paper(url).unwrap().unwrap().title, "Revised Title");
    }

    #[test]
    fn test_list_papers() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        store
            .upsert_paper(&sample_record("https://arxiv.org/abs/1", "One"))
            .unwrap();
        store
            .upsert_paper(&sample_record("https://arxiv.org/abs/2", "Two"))
            .unwrap();

        let records = store.list_papers().unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_batch_upsert() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        let records = vec![
            sample_record("https://arxiv.org/abs/1", "One"),
            sample_record("https://arxiv.org/abs/2", "Two"),
        ];

        let written = store.upsert_papers(&records).unwrap();
        assert_eq!(written, 2);
        assert_eq!(store.count_papers().unwrap(), 2);
    }

    #[test]
    fn test_count_on_empty_store() {
        let store = SqliteStore::new_in_memory().unwrap();
        assert_eq!(store.count_papers().unwrap(), 0);
    }
}
