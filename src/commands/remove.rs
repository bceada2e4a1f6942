// src/commands/remove.rs
//! Entry removal command

use anyhow::{Context, Result};
use apodary::db::models::Entry;
use std::path::PathBuf;
use tracing::info;

/// Remove an entry from the catalog
///
/// The materialized picture stays in the gallery; the catalog is an index
/// over the picture library, not its owner.
pub fn cmd_delete(id: i64, db_path: Option<PathBuf>) -> Result<()> {
    info!("Removing entry {}", id);
    let db_path = super::resolve_db_path(db_path);
    let conn = apodary::db::open(&db_path).context("Failed to open catalog database")?;

    Entry::delete(&conn, id).with_context(|| format!("Failed to remove entry {}", id))?;

    println!("Removed entry {}", id);
    println!("  The picture file is kept in the gallery.");

    Ok(())
}
