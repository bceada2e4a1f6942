// src/commands/mod.rs
//! Command handlers for the apodary CLI

mod query;
mod remove;
mod system;
mod update;

pub use query::{cmd_list, cmd_search, cmd_view};
pub use remove::cmd_delete;
pub use system::{cmd_init, cmd_ping, cmd_set_key};
pub use update::{cmd_apod, cmd_update};

use std::path::PathBuf;

/// Resolve the database path from an optional CLI override
fn resolve_db_path(db_path: Option<PathBuf>) -> PathBuf {
    db_path.unwrap_or_else(apodary::db::paths::default_db_path)
}
