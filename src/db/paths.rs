// src/db/paths.rs
//! Centralized path derivation for apodary directories

use std::path::PathBuf;

/// Get the data directory holding the catalog database and the API key file
pub fn data_dir() -> PathBuf {
    std::env::var_os("APODARY_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::data_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."))
                .join("apodary")
        })
}

/// Get the default catalog database path
pub fn default_db_path() -> PathBuf {
    data_dir().join("catalog.db")
}

/// Get the path of the stored API key
pub fn key_file() -> PathBuf {
    data_dir().join("api_key")
}

/// Get the gallery root where image assets are materialized
pub fn gallery_dir() -> PathBuf {
    std::env::var_os("APODARY_GALLERY_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Pictures")
                .join("Space")
                .join("APOD")
        })
}
