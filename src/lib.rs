//! # tablekv
//!
//! Typed records stored as Redis hashes, with a membership set and
//! sorted-set secondary indexes for ordered, paginated listing.
//!
//! ## Quick Start
//!
//! ```
//! use once_cell::sync::Lazy;
//! use tablekv::prelude::*;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct User {
//!     name: String,
//!     age: i64,
//! }
//!
//! static USER_SCHEMA: Lazy<Schema<User>> = Lazy::new(|| {
//!     Schema::new(vec![
//!         Field::text("name", |u: &User| u.name.as_str(), |u: &mut User, v| u.name = v),
//!         Field::int("age", |u: &User| u.age, |u: &mut User, v| u.age = v),
//!     ])
//! });
//!
//! impl Record for User {
//!     fn schema() -> &'static Schema<Self> {
//!         &USER_SCHEMA
//!     }
//! }
//!
//! # fn main() -> tablekv::Result<()> {
//! let store = RecordStore::new(MemoryPool::new());
//! let age = IndexDescriptor::numeric("age");
//!
//! store.insert("user", "1", &User { name: "alice".into(), age: 30 }, &[age.clone()])?;
//! store.insert("user", "2", &User { name: "bob".into(), age: 20 }, &[age.clone()])?;
//!
//! let page: Page<User> = store.list_sorted("user", &age, Order::Ascending, 10, 0)?;
//! assert_eq!(page.total, 2);
//! assert_eq!(page.records[0].name, "bob");
//! # Ok(())
//! # }
//! ```
//!
//! ## Keyspace
//!
//! - `table:id`: hash of field name to text value
//! - `table:index:id`: set of every stored id
//! - `table:index:<name>`: sorted set backing one index
//!
//! ## Crates
//!
//! - [`tablekv_core`]: schema, codec, keys, index declarations
//! - [`tablekv_storage`]: store command surface, pooling, in-memory backend
//! - [`tablekv_engine`]: record operations and listings

#![warn(missing_docs)]

pub mod prelude;

// Re-export main entry points
pub use tablekv_engine::{EngineConfig, Error, IndexMaintainer, Page, RecordStore, Result};

// Re-export core types
pub use tablekv_core::{
    codec, Field, FieldKind, FieldValue, IndexDescriptor, IndexKind, KeyError, Order, Record,
    Schema, TableKeys,
};

// Re-export store access
pub use tablekv_storage::{
    ConnectionPool, KvConnection, MemoryConfig, MemoryConnection, MemoryPool, MemoryStore,
    Pooled, StoreError,
};
