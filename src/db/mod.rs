// src/db/mod.rs

//! Catalog database connection management
//!
//! A single owned `Connection` is passed explicitly to every query and to the
//! sync orchestrator; there is no ambient global handle. Writes go through
//! `transaction`, which rolls back to the pre-call state when the closure
//! fails.

pub mod models;
pub mod paths;
pub mod schema;

use crate::error::{Error, Result};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Initialize the catalog database, creating it and its parent directories
/// if needed
pub fn init(db_path: &Path) -> Result<()> {
    let _conn = open(db_path)?;
    info!("Catalog database initialized at {}", db_path.display());
    Ok(())
}

/// Open the catalog database, running any pending migrations
pub fn open(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::IoError(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }

    let conn = Connection::open(db_path)?;
    conn.pragma_update(None, "foreign_keys", 1)?;
    // journal_mode returns the resulting mode as a row, so it cannot go
    // through pragma_update
    let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;

    schema::migrate(&conn)?;

    debug!("Opened catalog database at {}", db_path.display());
    Ok(conn)
}

/// Run a closure inside a database transaction
///
/// Commits when the closure returns `Ok`; any error drops the transaction,
/// rolling the store back to its pre-call state.
pub fn transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&rusqlite::Transaction<'_>) -> Result<T>,
{
    let tx = conn.transaction()?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Entry;
    use tempfile::NamedTempFile;

    #[test]
    fn test_transaction_commits_on_success() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut conn = open(temp_file.path()).unwrap();

        transaction(&mut conn, |tx| {
            Entry::new(
                1,
                "Nebula Glow".to_string(),
                "A nebula.".to_string(),
                "/tmp/nebula.png".to_string(),
                "17/01/2024 - 21:14:05".to_string(),
            )
            .insert(tx)
        })
        .unwrap();

        assert_eq!(Entry::count(&conn).unwrap(), 1);
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut conn = open(temp_file.path()).unwrap();

        let entry = Entry::new(
            1,
            "Nebula Glow".to_string(),
            "A nebula.".to_string(),
            "/tmp/nebula.png".to_string(),
            "17/01/2024 - 21:14:05".to_string(),
        );
        entry.insert(&conn).unwrap();

        // Second statement in the closure fails; the first must not survive
        let result = transaction(&mut conn, |tx| {
            Entry::new(
                2,
                "Kept?".to_string(),
                "Should roll back.".to_string(),
                "/tmp/kept.png".to_string(),
                "17/01/2024 - 21:14:06".to_string(),
            )
            .insert(tx)?;
            entry.insert(tx)
        });

        assert!(result.is_err());
        assert_eq!(Entry::count(&conn).unwrap(), 1);
        assert!(Entry::find_by_id(&conn, 2).unwrap().is_none());
    }
}
