//! Store access layer for tablekv
//!
//! This crate defines the Redis command surface the engine talks to and an
//! in-process backend for it:
//! - [`KvConnection`]: hash, set, sorted-set, and key-scan commands
//! - [`ConnectionPool`] / [`Pooled`]: scoped connection acquisition
//! - [`MemoryStore`] / [`MemoryPool`]: Redis-semantics backend in process memory

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod connection;
pub mod error;
pub mod memory;
pub mod pattern;
pub mod pool;
pub mod zset;

pub use connection::{KvConnection, LexBound, LexRange, Limit, ScanPage, ScoreRange};
pub use error::{StoreError, StoreResult};
pub use memory::{MemoryConfig, MemoryConnection, MemoryPool, MemoryStore};
pub use pattern::glob_match;
pub use pool::{ConnectionPool, Pooled};
pub use zset::SortedSet;
