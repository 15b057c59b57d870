//! Engine configuration
//!
//! Use the builder pattern to configure a store:
//!
//! ```
//! use tablekv_engine::EngineConfig;
//!
//! let config = EngineConfig::new().database(2).scan_count(100);
//! assert_eq!(config.database, 2);
//! ```

use serde::{Deserialize, Serialize};

/// Default `COUNT` hint for cursor scans
pub const DEFAULT_SCAN_COUNT: usize = 1000;

/// Options shared by every record store operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logical database selected on every acquired connection
    pub database: u64,
    /// `COUNT` hint for `SCAN`, `SSCAN` and `ZSCAN`
    pub scan_count: usize,
    /// Remove a record's existing index entries before writing new ones
    ///
    /// Costs one `HGETALL` per insert plus one `ZREM` per declared index the
    /// previous version had a value for. When off, re-inserting a record with
    /// a changed indexed value leaves the old entry behind.
    pub prune_stale_index_entries: bool,
}

impl EngineConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a logical database
    pub fn database(mut self, database: u64) -> Self {
        self.database = database;
        self
    }

    /// Set the scan `COUNT` hint (at least 1)
    pub fn scan_count(mut self, count: usize) -> Self {
        self.scan_count = count.max(1);
        self
    }

    /// Enable or disable stale index entry pruning on insert
    pub fn prune_stale_index_entries(mut self, prune: bool) -> Self {
        self.prune_stale_index_entries = prune;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database: 0,
            scan_count: DEFAULT_SCAN_COUNT,
            prune_stale_index_entries: true,
        }
    }
}
