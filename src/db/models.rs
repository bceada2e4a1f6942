// src/db/models.rs

//! Data models for the catalog database
//!
//! Defines the Rust structs that correspond to database tables and provides
//! methods for creating, reading, and deleting records. All statements are
//! parameterized; entry titles and search text come from uncontrolled input
//! and are never interpolated into SQL.

use crate::error::{Error, Result};
use rusqlite::{Connection, OptionalExtension, Row, params};

/// A persisted catalog entry: one synchronized APOD
///
/// Entries are immutable once committed. The id is assigned by the allocator
/// before insert, so unlike an AUTOINCREMENT key it is always present.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: i64,
    pub title: String,
    pub explanation: String,
    /// Absolute path of the materialized image asset
    pub image_location: String,
    /// When the entry was synchronized, stamped at commit time
    pub date: String,
}

/// The listing projection of an entry
#[derive(Debug, Clone)]
pub struct EntrySummary {
    pub id: i64,
    pub title: String,
    pub date: String,
}

impl Entry {
    /// Create a new entry
    pub fn new(
        id: i64,
        title: String,
        explanation: String,
        image_location: String,
        date: String,
    ) -> Self {
        Self {
            id,
            title,
            explanation,
            image_location,
            date,
        }
    }

    /// Insert this entry into the database
    ///
    /// Fails with `AlreadyExists` when the id collides with a live entry;
    /// the visible entry set is unchanged in that case.
    pub fn insert(&self, conn: &Connection) -> Result<()> {
        let result = conn.execute(
            "INSERT INTO entries (id, title, explanation, image_location, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                self.id,
                &self.title,
                &self.explanation,
                &self.image_location,
                &self.date,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::AlreadyExists(format!(
                    "entry id {} is already in use",
                    self.id
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find an entry by id
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, title, explanation, image_location, date FROM entries WHERE id = ?1",
        )?;

        let entry = stmt.query_row([id], Self::from_row).optional()?;
        Ok(entry)
    }

    /// Find the first entry whose title starts with the given prefix
    ///
    /// Title is not unique, so this returns a single arbitrary match (lowest
    /// rowid). LIKE wildcards in the prefix are escaped and match literally.
    pub fn find_by_title_prefix(conn: &Connection, prefix: &str) -> Result<Option<Self>> {
        let pattern = format!("{}%", escape_like(prefix));
        let mut stmt = conn.prepare(
            "SELECT id, title, explanation, image_location, date FROM entries
             WHERE title LIKE ?1 ESCAPE '\\' ORDER BY rowid LIMIT 1",
        )?;

        let entry = stmt.query_row([pattern], Self::from_row).optional()?;
        Ok(entry)
    }

    /// List all entries in insertion order
    pub fn list_all(conn: &Connection) -> Result<Vec<EntrySummary>> {
        let mut stmt =
            conn.prepare("SELECT id, title, date FROM entries ORDER BY rowid")?;

        let entries = stmt
            .query_map([], |row| {
                Ok(EntrySummary {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    date: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Delete an entry by id
    ///
    /// Fails with `NotFound` when no entry has the id; the entry set is
    /// unchanged in that case. The backing asset file is never touched.
    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        let deleted = conn.execute("DELETE FROM entries WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("no entry with id {}", id)));
        }
        Ok(())
    }

    /// Check whether any live entry carries this exact title
    pub fn title_exists(conn: &Connection, title: &str) -> Result<bool> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM entries WHERE title = ?1)",
            [title],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Count live entries
    pub fn count(conn: &Connection) -> Result<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            explanation: row.get(2)?,
            image_location: row.get(3)?,
            date: row.get(4)?,
        })
    }
}

/// Escape LIKE wildcards so user-supplied prefixes match literally
fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
