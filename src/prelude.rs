//! Convenient imports for tablekv.
//!
//! ```
//! use tablekv::prelude::*;
//!
//! let store = RecordStore::new(MemoryPool::new());
//! assert_eq!(store.count("user").unwrap(), 0);
//! ```

// Main entry point
pub use crate::{EngineConfig, Page, RecordStore};

// Error handling
pub use crate::{Error, Result};

// Schema and indexes
pub use crate::{Field, IndexDescriptor, IndexKind, Order, Record, Schema};

// Store access
pub use crate::{ConnectionPool, KvConnection, MemoryPool};

// Timestamp fields
pub use chrono::{DateTime, Utc};
