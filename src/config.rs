// src/config.rs

//! API key resolution and storage
//!
//! The key is read from the `NASA_API_KEY` environment variable when set,
//! otherwise from the key file under the data directory. `set-key` callers
//! are expected to validate a key against the live endpoint before storing
//! it.

use crate::db::paths;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable overriding the stored API key
pub const API_KEY_ENV: &str = "NASA_API_KEY";

/// Resolve the API key from the environment or the key file
pub fn load_api_key() -> Result<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        let key = key.trim().to_string();
        if !key.is_empty() {
            debug!("Using API key from {}", API_KEY_ENV);
            return Ok(key);
        }
    }

    read_key_file(&paths::key_file())
}

/// Persist the API key to the key file
pub fn store_api_key(key: &str) -> Result<()> {
    write_key_file(&paths::key_file(), key)
}

fn read_key_file(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::InitError(format!(
            "No API key configured: set {API_KEY_ENV} or run 'apodary set-key' ({e})"
        ))
    })?;

    let key = contents.trim().to_string();
    if key.is_empty() {
        return Err(Error::InitError(format!(
            "API key file {} is empty",
            path.display()
        )));
    }
    Ok(key)
}

fn write_key_file(path: &Path, key: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::IoError(format!(
                "Failed to create data directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    fs::write(path, key.trim()).map_err(|e| {
        Error::IoError(format!("Failed to write key file {}: {e}", path.display()))
    })?;

    info!("Stored API key at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_file_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let key_path = temp_dir.path().join("nested").join("api_key");

        write_key_file(&key_path, "  DEMO_KEY\n").unwrap();
        assert_eq!(read_key_file(&key_path).unwrap(), "DEMO_KEY");
    }

    #[test]
    fn test_missing_key_file_reports_init_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = read_key_file(&temp_dir.path().join("absent"));
        assert!(matches!(result, Err(Error::InitError(_))));
    }

    #[test]
    fn test_empty_key_file_reports_init_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let key_path = temp_dir.path().join("api_key");
        write_key_file(&key_path, "   ").unwrap();

        let result = read_key_file(&key_path);
        assert!(matches!(result, Err(Error::InitError(_))));
    }
}
