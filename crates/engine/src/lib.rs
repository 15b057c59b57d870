//! Record engine for tablekv
//!
//! This crate implements the operations callers use:
//! - [`RecordStore`]: insert, get, delete, exists, count, clear
//! - [`RecordStore::list_all`] / [`RecordStore::list_sorted`]: listings
//! - [`IndexMaintainer`]: sorted-set index upkeep
//! - [`EngineConfig`]: database selection, scan sizing, stale-entry pruning

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod scan;
pub mod store;

#[cfg(test)]
mod fixtures;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use index::IndexMaintainer;
pub use query::Page;
pub use store::RecordStore;
