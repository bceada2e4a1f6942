// src/commands/system.rs
//! Database initialization and API key commands

use anyhow::Result;
use apodary::{ApodClient, KeyStatus};
use std::path::PathBuf;
use tracing::info;

/// Initialize the catalog database
pub fn cmd_init(db_path: Option<PathBuf>) -> Result<()> {
    let db_path = super::resolve_db_path(db_path);
    apodary::db::init(&db_path)?;
    println!("Catalog database initialized at: {}", db_path.display());
    Ok(())
}

/// Probe the APOD service with the configured API key
pub fn cmd_ping() -> Result<()> {
    let api_key = apodary::config::load_api_key()?;
    let client = ApodClient::new()?;

    match client.probe_key(&api_key)? {
        KeyStatus::Valid => {
            println!("The configured API key is valid.");
            Ok(())
        }
        KeyStatus::Forbidden => Err(anyhow::anyhow!(
            "The configured API key is invalid. Access forbidden (403)"
        )),
        KeyStatus::Unexpected(code) => {
            Err(anyhow::anyhow!("Unexpected response. Status code: {}", code))
        }
    }
}

/// Validate a new API key against the service and store it
pub fn cmd_set_key(key: &str) -> Result<()> {
    info!("Validating new API key");
    let client = ApodClient::new()?;

    match client.probe_key(key)? {
        KeyStatus::Valid => {
            apodary::config::store_api_key(key)?;
            println!("API key changed successfully.");
            Ok(())
        }
        KeyStatus::Forbidden => Err(anyhow::anyhow!(
            "Unable to change API key: the service rejected it (403)"
        )),
        KeyStatus::Unexpected(code) => Err(anyhow::anyhow!(
            "Unable to change API key: unexpected response status {}",
            code
        )),
    }
}
