use super::BookmarkStore;
use crate::error::Result;
use crate::segmenter::CutSet;
use log::debug;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite-backed bookmark store
pub struct BookmarkDb {
    conn: Connection,
}

impl BookmarkDb {
    /// Create a new in-memory database
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        debug!("Opened bookmark database at {}", path.display());
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS bookmarks (
                filename TEXT NOT NULL,
                page INTEGER NOT NULL,
                PRIMARY KEY (filename, page)
            );
            "#,
        )?;
        Ok(())
    }
}

impl BookmarkStore for BookmarkDb {
    fn load(&self, document: &str) -> Result<CutSet> {
        let mut stmt = self
            .conn
            .prepare("SELECT page FROM bookmarks WHERE filename = ?1")?;

        let pages = stmt
            .query_map(params![document], |row| row.get::<_, i64>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(pages
            .into_iter()
            .filter_map(|page| usize::try_from(page).ok())
            .collect())
    }

    fn add(&self, document: &str, page: usize) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO bookmarks (filename, page) VALUES (?1, ?2)",
            params![document, page as i64],
        )?;
        Ok(inserted > 0)
    }

    fn remove(&self, document: &str, page: usize) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM bookmarks WHERE filename = ?1 AND page = ?2",
            params![document, page as i64],
        )?;
        Ok(deleted > 0)
    }

    fn clear(&self, document: &str) -> Result<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM bookmarks WHERE filename = ?1",
            params![document],
        )?;
        Ok(deleted)
    }

    fn documents(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT filename FROM bookmarks ORDER BY filename")?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(names)
    }
}
