//! Primary store operations
//!
//! Every operation acquires one pooled connection, selects the configured
//! database and runs a fixed sequence of commands. The connection goes back
//! to the pool when the guard drops, on every exit path.
//!
//! ## Consistency
//!
//! Multi-step sequences are not atomic. Insert writes the hash, then the
//! membership set, then the indexes; delete removes membership, then index
//! entries, then the hash. A concurrent reader, or a failure between steps,
//! can observe a hash without index entries or index entries without a hash.
//! Listing skips the latter. Concurrent writers to one id race at the store.

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::index::IndexMaintainer;
use crate::scan;
use tablekv_core::keys::{validate_id, validate_index};
use tablekv_core::{codec, IndexDescriptor, Record, TableKeys};
use tablekv_storage::{ConnectionPool, KvConnection, Pooled};
use tracing::debug;

/// Typed records in a key-value store
///
/// # Example
///
/// ```
/// use tablekv_engine::RecordStore;
/// use tablekv_storage::MemoryPool;
///
/// let store = RecordStore::new(MemoryPool::new());
/// assert_eq!(store.count("user").unwrap(), 0);
/// ```
#[derive(Debug)]
pub struct RecordStore<P: ConnectionPool> {
    pool: P,
    config: EngineConfig,
}

impl<P: ConnectionPool> RecordStore<P> {
    /// Create a store with default configuration
    pub fn new(pool: P) -> Self {
        Self::with_config(pool, EngineConfig::default())
    }

    /// Create a store
    pub fn with_config(pool: P, config: EngineConfig) -> Self {
        Self { pool, config }
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Acquire a connection with the configured database selected
    pub(crate) fn connection(&self) -> Result<Pooled<'_, P>> {
        let mut conn = self.pool.acquire()?;
        conn.select(self.config.database)?;
        Ok(conn)
    }

    pub(crate) fn maintainer<'k>(&self, keys: &'k TableKeys) -> IndexMaintainer<'k> {
        IndexMaintainer::new(keys, self.config.scan_count)
    }

    /// Store `record` under `id`, replacing any previous version
    ///
    /// Writes the hash, drops schema fields the record leaves out, adds `id` to
    /// the membership set and writes one entry per index the record has a value
    /// for. With `prune_stale_index_entries` set, the previous hash is read
    /// first and the entries derived from it are removed before the new ones
    /// are written.
    pub fn insert<R: Record>(
        &self,
        table: &str,
        id: &str,
        record: &R,
        indexes: &[IndexDescriptor],
    ) -> Result<()> {
        let keys = TableKeys::new(table)?;
        validate_id(id)?;
        validate_indexes(indexes)?;

        let encoded = codec::encode(record, id, indexes);
        debug!(
            table,
            id,
            fields = encoded.fields.len(),
            index_entries = encoded.index_entries.len(),
            "insert"
        );

        let mut conn = self.connection()?;
        let record_key = keys.record(id);
        let prune = self.config.prune_stale_index_entries && !indexes.is_empty();
        let previous = if prune {
            conn.hgetall(&record_key)?
        } else {
            Vec::new()
        };

        conn.hset(&record_key, &encoded.fields)?;
        if !encoded.omitted.is_empty() {
            conn.hdel(&record_key, &encoded.omitted)?;
        }
        conn.sadd(&keys.membership(), id)?;

        let maintainer = self.maintainer(&keys);
        if prune && !previous.is_empty() {
            let pruned = maintainer.remove_previous(&mut *conn, id, indexes, &previous)?;
            debug!(table, id, pruned, "pruned previous index entries");
        }
        maintainer.apply(&mut *conn, &encoded.index_entries)?;
        Ok(())
    }

    /// Load the record stored under `id`
    ///
    /// Fails with [`Error::NotFound`] if the hash is missing.
    pub fn get<R: Record>(&self, table: &str, id: &str) -> Result<R> {
        let keys = TableKeys::new(table)?;
        validate_id(id)?;
        debug!(table, id, "get");

        let mut conn = self.connection()?;
        read_record(&mut *conn, &keys, id)?.ok_or_else(|| Error::NotFound(keys.record(id)))
    }

    /// Whether `id` is in the table's membership set
    pub fn exists(&self, table: &str, id: &str) -> Result<bool> {
        let keys = TableKeys::new(table)?;
        validate_id(id)?;

        let mut conn = self.connection()?;
        Ok(conn.sismember(&keys.membership(), id)?)
    }

    /// Number of records in the table (0 when empty)
    pub fn count(&self, table: &str) -> Result<u64> {
        let keys = TableKeys::new(table)?;
        let mut conn = self.connection()?;
        Ok(conn.scard(&keys.membership())?)
    }

    /// Remove the record under `id` and its entries in `indexes`
    ///
    /// Deleting an id that is not stored is not an error.
    pub fn delete(&self, table: &str, id: &str, indexes: &[IndexDescriptor]) -> Result<()> {
        let keys = TableKeys::new(table)?;
        validate_id(id)?;
        validate_indexes(indexes)?;
        debug!(table, id, indexes = indexes.len(), "delete");

        let mut conn = self.connection()?;
        conn.srem(&keys.membership(), id)?;
        self.maintainer(&keys).remove(&mut *conn, id, indexes)?;
        conn.del(&keys.record(id))?;
        Ok(())
    }

    /// Delete every key in the table's namespace
    ///
    /// Fails with [`Error::NotFound`] if the namespace holds no keys. Returns
    /// the number of keys deleted.
    pub fn clear_table(&self, table: &str) -> Result<usize> {
        let keys = TableKeys::new(table)?;
        let mut conn = self.connection()?;

        let pattern = keys.all_keys_pattern();
        let found = scan::keys(&mut *conn, &pattern, self.config.scan_count)?;
        if found.is_empty() {
            return Err(Error::NotFound(pattern));
        }

        for key in &found {
            conn.del(key)?;
        }
        debug!(table, keys = found.len(), "cleared table");
        Ok(found.len())
    }
}

/// Reject index names that would address the membership set
fn validate_indexes(indexes: &[IndexDescriptor]) -> Result<()> {
    for index in indexes {
        validate_index(&index.name)?;
    }
    Ok(())
}

/// Read and decode one record hash, `None` if it is missing
pub(crate) fn read_record<R, C>(conn: &mut C, keys: &TableKeys, id: &str) -> Result<Option<R>>
where
    R: Record,
    C: KvConnection + ?Sized,
{
    let pairs = conn.hgetall(&keys.record(id))?;
    if pairs.is_empty() {
        return Ok(None);
    }
    Ok(Some(codec::decode(&pairs)))
}
