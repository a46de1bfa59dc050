//! Fitvault - snapshot, branch and restore engine for fitness data
//!
//! This library captures a user's fitness and nutrition collections (meals,
//! exercises, weights, sleep, vitals, ...) as immutable snapshots, organizes
//! them into independent tracks that can be branched like version-control
//! branches, and restores whole snapshots or selected categories back onto
//! live data.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and backup settings
//! - `error`: Custom error types
//! - `models`: Snapshots, tracks, entity categories and payloads
//! - `storage`: Blob stores and the repositories built on them
//! - `backup`: Entity collection, retention selection, archive files
//! - `services`: The public operations (snapshot, restore, track, ...)
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `fitvault` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fitvault::models::SnapshotKind;
//! use fitvault::services::{RestoreOptions, RestoreService, SnapshotService, TrackService};
//! use fitvault::storage::Storage;
//!
//! let storage = Storage::in_memory()?;
//! let ctx = TrackService::new(&storage).open_context()?;
//!
//! let snapshot = SnapshotService::new(&storage).create(&ctx, SnapshotKind::Manual, None)?;
//! let outcome = RestoreService::new(&storage).restore(&ctx, &RestoreOptions::full(snapshot.id))?;
//! assert!(outcome.success);
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{VaultError, VaultResult};
