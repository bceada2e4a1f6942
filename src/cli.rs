// src/cli.rs
//! CLI definitions for apodary
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apodary")]
#[command(version)]
#[command(about = "Catalog manager for NASA's Astronomy Picture of the Day", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the catalog database
    Init {
        /// Path to the database file (default: the platform data directory)
        #[arg(short, long)]
        db_path: Option<PathBuf>,
    },

    /// Fetch today's APOD and add it to the catalog
    Update {
        /// Path to the database file (default: the platform data directory)
        #[arg(short, long)]
        db_path: Option<PathBuf>,
    },

    /// List all catalog entries in insertion order
    List {
        /// Path to the database file (default: the platform data directory)
        #[arg(short, long)]
        db_path: Option<PathBuf>,
    },

    /// Find an entry whose title starts with the given prefix
    Search {
        /// Title prefix to look for
        prefix: String,

        /// Path to the database file (default: the platform data directory)
        #[arg(short, long)]
        db_path: Option<PathBuf>,
    },

    /// Show a single entry by id
    View {
        /// Entry id
        id: i64,

        /// Path to the database file (default: the platform data directory)
        #[arg(short, long)]
        db_path: Option<PathBuf>,
    },

    /// Remove an entry by id (the picture file is kept)
    Delete {
        /// Entry id
        id: i64,

        /// Path to the database file (default: the platform data directory)
        #[arg(short, long)]
        db_path: Option<PathBuf>,
    },

    /// Show today's APOD without adding it to the catalog
    Apod,

    /// Check the configured API key against the APOD service
    Ping,

    /// Validate and store a new API key
    SetKey {
        /// The API key to validate and store
        key: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
