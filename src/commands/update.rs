// src/commands/update.rs
//! Catalog update and APOD display commands

use anyhow::{Context, Result};
use apodary::ApodClient;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

/// Create a styled progress bar for the image download
fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    pb.set_message("apod image");
    pb
}

/// Run one sync cycle: fetch, materialize, allocate, commit
pub fn cmd_update(db_path: Option<PathBuf>) -> Result<()> {
    let db_path = super::resolve_db_path(db_path);
    info!("Updating catalog at {}", db_path.display());

    let api_key = apodary::config::load_api_key().context("No usable API key")?;
    let client = ApodClient::new()?;
    let mut conn = apodary::db::open(&db_path).context("Failed to open catalog database")?;
    let gallery_root = apodary::db::paths::gallery_dir();

    let pb = create_progress_bar();
    let result = apodary::sync(&mut conn, &client, &api_key, &gallery_root, Some(&pb));
    pb.finish_and_clear();

    let entry = result.context("Sync cycle aborted")?;

    println!("Added entry {}: {}", entry.id, entry.title);
    println!("  Date added: {}", entry.date);
    println!("  Image: {}", entry.image_location);

    Ok(())
}

/// Fetch and display today's APOD without persisting anything
pub fn cmd_apod() -> Result<()> {
    let api_key = apodary::config::load_api_key().context("No usable API key")?;
    let client = ApodClient::new()?;

    let descriptor = client
        .fetch_apod(&api_key)
        .context("Failed to fetch today's APOD")?;

    println!("Title: {}", descriptor.title);
    println!();
    println!("{}", descriptor.explanation);
    println!();
    println!("Image: {}", descriptor.url);

    Ok(())
}
