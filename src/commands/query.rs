// src/commands/query.rs
//! Catalog lookup and listing commands

use anyhow::Result;
use apodary::db::models::Entry;
use std::path::PathBuf;
use tracing::info;

/// List all entries in insertion order
pub fn cmd_list(db_path: Option<PathBuf>) -> Result<()> {
    let db_path = super::resolve_db_path(db_path);
    let conn = apodary::db::open(&db_path)?;

    let entries = Entry::list_all(&conn)?;

    if entries.is_empty() {
        println!("No entries in the catalog.");
    } else {
        println!("Catalog entries:");
        for entry in &entries {
            println!("  [{}] {} - {}", entry.id, entry.date, entry.title);
        }
        println!("\nTotal: {} entry(ies)", entries.len());
    }

    Ok(())
}

/// Find an entry by title prefix and print it
pub fn cmd_search(prefix: &str, db_path: Option<PathBuf>) -> Result<()> {
    info!("Searching catalog for title prefix: {}", prefix);
    let db_path = super::resolve_db_path(db_path);
    let conn = apodary::db::open(&db_path)?;

    let entry = Entry::find_by_title_prefix(&conn, prefix)?.ok_or_else(|| {
        anyhow::anyhow!("No entry with a title starting with '{}'", prefix)
    })?;

    print_entry(&entry);
    Ok(())
}

/// Show a single entry by id
pub fn cmd_view(id: i64, db_path: Option<PathBuf>) -> Result<()> {
    info!("Viewing entry {}", id);
    let db_path = super::resolve_db_path(db_path);
    let conn = apodary::db::open(&db_path)?;

    let entry = Entry::find_by_id(&conn, id)?
        .ok_or_else(|| anyhow::anyhow!("No entry with id {}", id))?;

    print_entry(&entry);
    Ok(())
}

fn print_entry(entry: &Entry) {
    println!("Entry {}", entry.id);
    println!("  Date added: {}", entry.date);
    println!("  Title: {}", entry.title);
    println!("  Image: {}", entry.image_location);
    println!();
    println!("{}", entry.explanation);
}
