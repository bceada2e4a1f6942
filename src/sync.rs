// src/sync.rs

//! The sync orchestrator: one end-to-end catalog update cycle
//!
//! A cycle fetches the remote descriptor, materializes its image asset,
//! allocates a fresh identifier, and commits the entry, each step a hard
//! dependency on the one before it. This is the single write path into the
//! catalog; callers must not run two cycles in overlapping windows.

use crate::client::ApodClient;
use crate::db::{self, models::Entry};
use crate::error::{Error, Result};
use crate::gallery;
use chrono::Local;
use indicatif::ProgressBar;
use rand::Rng;
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info, warn};

/// Inclusive bounds of the identifier space
const ID_MIN: i64 = 0;
const ID_MAX: i64 = 1000;

/// Timestamp format stamped on each committed entry
const DATE_FORMAT: &str = "%d/%m/%Y - %X";

/// A failed sync cycle, classified by the step that aborted it
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Failed to fetch descriptor: {0}")]
    Fetch(#[source] Error),

    #[error("Failed to materialize asset: {0}")]
    Materialize(#[source] Error),

    #[error("Failed to allocate an entry id: {0}")]
    Allocate(#[source] Error),

    #[error("Failed to commit entry: {0}")]
    Store(#[source] Error),
}

/// Run one sync cycle and return the committed entry
///
/// A failure at any step aborts the remaining steps. A failed fetch leaves
/// no side effects at all; a failed commit leaves the already-written asset
/// in the gallery (asset writes are cheap, idempotent, and independent of
/// catalog consistency).
pub fn sync(
    conn: &mut Connection,
    client: &ApodClient,
    api_key: &str,
    gallery_root: &Path,
    progress: Option<&ProgressBar>,
) -> std::result::Result<Entry, SyncError> {
    let descriptor = client.fetch_apod(api_key).map_err(SyncError::Fetch)?;
    info!("Syncing \"{}\"", descriptor.title);

    let asset = gallery::materialize(client, &descriptor, gallery_root, progress)
        .map_err(SyncError::Materialize)?;

    let id = allocate_id(conn).map_err(SyncError::Allocate)?;
    let date = Local::now().format(DATE_FORMAT).to_string();

    if Entry::title_exists(conn, &descriptor.title).map_err(SyncError::Store)? {
        warn!(
            "An entry titled \"{}\" already exists; adding another under id {}",
            descriptor.title, id
        );
    }

    let entry = Entry::new(
        id,
        descriptor.title,
        descriptor.explanation,
        asset.to_string_lossy().into_owned(),
        date,
    );
    db::transaction(conn, |tx| entry.insert(tx)).map_err(SyncError::Store)?;

    info!("Committed entry {} (\"{}\")", entry.id, entry.title);
    Ok(entry)
}

/// Allocate an identifier not currently held by any live entry
///
/// Rejection sampling over the bounded space: draw uniformly, reject on a
/// point-lookup collision, redraw. Fails once the live entry count fills the
/// space, since no candidate could ever be accepted.
pub fn allocate_id(conn: &Connection) -> Result<i64> {
    allocate_id_in(conn, &mut rand::thread_rng(), ID_MIN, ID_MAX)
}

fn allocate_id_in<R: Rng>(conn: &Connection, rng: &mut R, min: i64, max: i64) -> Result<i64> {
    let live = Entry::count(conn)?;
    let space = max - min + 1;
    if live >= space {
        return Err(Error::AllocationError(format!(
            "identifier space exhausted: {live} live entries, {space} identifiers"
        )));
    }

    loop {
        let candidate = rng.gen_range(min..=max);
        if Entry::find_by_id(conn, candidate)?.is_none() {
            debug!("Allocated id {}", candidate);
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::NamedTempFile;

    fn create_test_db() -> (NamedTempFile, Connection) {
        let temp_file = NamedTempFile::new().unwrap();
        let conn = Connection::open(temp_file.path()).unwrap();
        crate::db::schema::migrate(&conn).unwrap();
        (temp_file, conn)
    }

    fn occupy(conn: &Connection, id: i64) {
        Entry::new(
            id,
            format!("Entry {}", id),
            "Occupies an id.".to_string(),
            format!("/tmp/{}.png", id),
            "17/01/2024 - 21:14:05".to_string(),
        )
        .insert(conn)
        .unwrap();
    }

    #[test]
    fn test_allocate_never_returns_live_id() {
        let (_temp, conn) = create_test_db();

        // Occupy everything in 0..=9 except 4 and 9
        for id in 0..=8 {
            if id != 4 {
                occupy(&conn, id);
            }
        }

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let id = allocate_id_in(&conn, &mut rng, 0, 9).unwrap();
            assert!(id == 4 || id == 9, "allocated live id {}", id);
        }
    }

    #[test]
    fn test_allocate_fails_on_full_space() {
        let (_temp, conn) = create_test_db();

        for id in 0..=2 {
            occupy(&conn, id);
        }

        let mut rng = StdRng::seed_from_u64(7);
        let result = allocate_id_in(&conn, &mut rng, 0, 2);
        assert!(matches!(result, Err(Error::AllocationError(_))));
    }

    #[test]
    fn test_allocated_ids_stay_unique_across_inserts() {
        let (_temp, conn) = create_test_db();

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let id = allocate_id_in(&conn, &mut rng, 0, 30).unwrap();
            occupy(&conn, id);
        }

        // Every insert succeeded against the UNIQUE constraint, so all 20
        // allocations were collision-free
        assert_eq!(Entry::count(&conn).unwrap(), 20);
    }
}
