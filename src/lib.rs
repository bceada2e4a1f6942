// src/lib.rs

//! Apodary
//!
//! Local catalog manager for NASA's Astronomy Picture of the Day.
//!
//! # Architecture
//!
//! - Database-first: catalog state lives in SQLite, assets live on disk
//! - Single write path: the sync orchestrator is the only creator of entries
//! - Gallery as library: removing an entry never deletes its picture
//! - Explicit handles: the store connection is owned and passed, never global

pub mod client;
pub mod config;
pub mod db;
mod error;
pub mod gallery;
pub mod sync;

pub use client::{ApodClient, Descriptor, KeyStatus};
pub use error::{Error, Result};
pub use sync::{SyncError, sync};
