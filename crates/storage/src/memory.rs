//! In-memory Redis-compatible backend
//!
//! Implements every [`KvConnection`] command over process memory, with the
//! same reply semantics as a Redis server: empty collections vanish, missing
//! keys read as empty, commands against a key of another type fail with
//! `WRONGTYPE`.
//!
//! # Design
//!
//! - DashMap: one shard per logical database, so databases never contend
//! - FxHashMap: O(1) key lookups inside a database
//! - Scans walk a sorted snapshot of keys; the cursor is the position reached
//!
//! # Example
//!
//! ```
//! use tablekv_storage::{ConnectionPool, KvConnection, MemoryPool};
//!
//! let pool = MemoryPool::new();
//! let mut conn = pool.acquire().unwrap();
//! conn.sadd("user:index:id", "1").unwrap();
//! assert_eq!(conn.scard("user:index:id").unwrap(), 1);
//! ```

use crate::connection::{KvConnection, LexRange, Limit, ScanPage, ScoreRange};
use crate::error::{StoreError, StoreResult};
use crate::pattern::glob_match;
use crate::pool::ConnectionPool;
use crate::zset::SortedSet;
use dashmap::DashMap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tablekv_core::Order;
use tracing::trace;

/// Configuration for the in-memory backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Number of logical databases reachable with `SELECT`
    pub databases: u64,
    /// Connections kept around for reuse
    pub max_idle: usize,
    /// Maximum connections on loan at once (0 = unlimited)
    pub max_active: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            databases: 16,
            max_idle: 8,
            max_active: 0,
        }
    }
}

impl MemoryConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of logical databases
    pub fn databases(mut self, databases: u64) -> Self {
        self.databases = databases;
        self
    }

    /// Set the idle connection capacity
    pub fn max_idle(mut self, max_idle: usize) -> Self {
        self.max_idle = max_idle;
        self
    }

    /// Set the active connection limit (0 = unlimited)
    pub fn max_active(mut self, max_active: usize) -> Self {
        self.max_active = max_active;
        self
    }
}

/// A stored value
#[derive(Debug)]
enum Entry {
    Hash(Vec<(String, String)>),
    Set(BTreeSet<String>),
    SortedSet(SortedSet),
}

impl Entry {
    fn is_empty(&self) -> bool {
        match self {
            Entry::Hash(fields) => fields.is_empty(),
            Entry::Set(members) => members.is_empty(),
            Entry::SortedSet(zset) => zset.is_empty(),
        }
    }
}

/// One logical database
#[derive(Debug, Default)]
struct Keyspace {
    data: FxHashMap<String, Entry>,
}

impl Keyspace {
    /// Drop `key` if its collection became empty
    fn prune(&mut self, key: &str) {
        if self.data.get(key).map_or(false, Entry::is_empty) {
            self.data.remove(key);
        }
    }
}

fn wrong_type(key: &str) -> StoreError {
    StoreError::WrongType {
        key: key.to_string(),
    }
}

/// Sorted snapshot window for cursor scans
///
/// Returns the window starting at `cursor` and the next cursor (0 when done).
fn scan_window<T: Clone>(sorted: &[T], cursor: u64, count: usize) -> (Vec<T>, u64) {
    let start = usize::try_from(cursor).unwrap_or(usize::MAX).min(sorted.len());
    let end = start.saturating_add(count.max(1)).min(sorted.len());
    let next = if end >= sorted.len() { 0 } else { end as u64 };
    (sorted[start..end].to_vec(), next)
}

/// Process-local key-value store
///
/// Shared by every connection created from it. All operations are
/// thread-safe; different databases never contend.
#[derive(Debug)]
pub struct MemoryStore {
    databases: DashMap<u64, Keyspace>,
    config: MemoryConfig,
}

impl MemoryStore {
    /// Create an empty store with default configuration
    pub fn new() -> Self {
        Self::with_config(MemoryConfig::default())
    }

    /// Create an empty store
    pub fn with_config(config: MemoryConfig) -> Self {
        Self {
            databases: DashMap::new(),
            config,
        }
    }

    /// Store configuration
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Open a connection on database 0
    pub fn connect(self: &Arc<Self>) -> MemoryConnection {
        MemoryConnection {
            store: Arc::clone(self),
            database: 0,
        }
    }

    /// Number of keys in `database`
    pub fn key_count(&self, database: u64) -> usize {
        self.databases
            .get(&database)
            .map(|ks| ks.data.len())
            .unwrap_or(0)
    }

    /// Remove every key from every database
    pub fn flush_all(&self) {
        self.databases.clear();
    }

    fn read<T>(&self, database: u64, f: impl FnOnce(&Keyspace) -> StoreResult<T>) -> StoreResult<T> {
        match self.databases.get(&database) {
            Some(ks) => f(ks.value()),
            None => f(&Keyspace::default()),
        }
    }

    fn write<T>(
        &self,
        database: u64,
        f: impl FnOnce(&mut Keyspace) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut ks = self.databases.entry(database).or_default();
        f(ks.value_mut())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A connection to a [`MemoryStore`]
#[derive(Debug, Clone)]
pub struct MemoryConnection {
    store: Arc<MemoryStore>,
    database: u64,
}

impl MemoryConnection {
    /// Currently selected database
    pub fn database(&self) -> u64 {
        self.database
    }

    /// The backing store
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    fn read<T>(&self, f: impl FnOnce(&Keyspace) -> StoreResult<T>) -> StoreResult<T> {
        self.store.read(self.database, f)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Keyspace) -> StoreResult<T>) -> StoreResult<T> {
        self.store.write(self.database, f)
    }

    fn with_set<T>(&self, key: &str, f: impl FnOnce(&BTreeSet<String>) -> T) -> StoreResult<T> {
        self.read(|ks| match ks.data.get(key) {
            None => Ok(f(&BTreeSet::new())),
            Some(Entry::Set(members)) => Ok(f(members)),
            Some(_) => Err(wrong_type(key)),
        })
    }

    fn with_zset<T>(&self, key: &str, f: impl FnOnce(&SortedSet) -> T) -> StoreResult<T> {
        self.read(|ks| match ks.data.get(key) {
            None => Ok(f(&SortedSet::new())),
            Some(Entry::SortedSet(zset)) => Ok(f(zset)),
            Some(_) => Err(wrong_type(key)),
        })
    }
}

impl KvConnection for MemoryConnection {
    fn select(&mut self, database: u64) -> StoreResult<()> {
        if database >= self.store.config.databases {
            return Err(StoreError::Protocol("DB index is out of range".to_string()));
        }
        self.database = database;
        Ok(())
    }

    fn hset(&mut self, key: &str, fields: &[(String, String)]) -> StoreResult<u64> {
        if fields.is_empty() {
            return Err(StoreError::Protocol(
                "wrong number of arguments for 'hset' command".to_string(),
            ));
        }
        self.write(|ks| {
            let entry = ks
                .data
                .entry(key.to_string())
                .or_insert_with(|| Entry::Hash(Vec::new()));
            let Entry::Hash(stored) = entry else {
                return Err(wrong_type(key));
            };

            let mut added = 0;
            for (name, value) in fields {
                match stored.iter_mut().find(|(n, _)| n == name) {
                    Some((_, v)) => *v = value.clone(),
                    None => {
                        stored.push((name.clone(), value.clone()));
                        added += 1;
                    }
                }
            }
            Ok(added)
        })
    }

    fn hdel(&mut self, key: &str, fields: &[&str]) -> StoreResult<u64> {
        self.write(|ks| {
            let removed = match ks.data.get_mut(key) {
                None => return Ok(0),
                Some(Entry::Hash(stored)) => {
                    let before = stored.len();
                    stored.retain(|(name, _)| !fields.contains(&name.as_str()));
                    (before - stored.len()) as u64
                }
                Some(_) => return Err(wrong_type(key)),
            };
            ks.prune(key);
            Ok(removed)
        })
    }

    fn hgetall(&mut self, key: &str) -> StoreResult<Vec<(String, String)>> {
        self.read(|ks| match ks.data.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::Hash(fields)) => Ok(fields.clone()),
            Some(_) => Err(wrong_type(key)),
        })
    }

    fn sadd(&mut self, key: &str, member: &str) -> StoreResult<bool> {
        self.write(|ks| {
            let entry = ks
                .data
                .entry(key.to_string())
                .or_insert_with(|| Entry::Set(BTreeSet::new()));
            match entry {
                Entry::Set(members) => Ok(members.insert(member.to_string())),
                _ => Err(wrong_type(key)),
            }
        })
    }

    fn srem(&mut self, key: &str, member: &str) -> StoreResult<bool> {
        self.write(|ks| {
            let removed = match ks.data.get_mut(key) {
                None => return Ok(false),
                Some(Entry::Set(members)) => members.remove(member),
                Some(_) => return Err(wrong_type(key)),
            };
            ks.prune(key);
            Ok(removed)
        })
    }

    fn sismember(&mut self, key: &str, member: &str) -> StoreResult<bool> {
        self.with_set(key, |members| members.contains(member))
    }

    fn scard(&mut self, key: &str) -> StoreResult<u64> {
        self.with_set(key, |members| members.len() as u64)
    }

    fn sscan(&mut self, key: &str, cursor: u64, count: usize) -> StoreResult<ScanPage<String>> {
        let members: Vec<String> = self.with_set(key, |members| members.iter().cloned().collect())?;
        let (items, cursor) = scan_window(&members, cursor, count);
        Ok(ScanPage { cursor, items })
    }

    fn zadd(&mut self, key: &str, score: f64, member: &str) -> StoreResult<bool> {
        if score.is_nan() {
            return Err(StoreError::Protocol("value is not a valid float".to_string()));
        }
        self.write(|ks| {
            let entry = ks
                .data
                .entry(key.to_string())
                .or_insert_with(|| Entry::SortedSet(SortedSet::new()));
            match entry {
                Entry::SortedSet(zset) => Ok(zset.insert(member, score)),
                _ => Err(wrong_type(key)),
            }
        })
    }

    fn zrem(&mut self, key: &str, member: &str) -> StoreResult<bool> {
        self.write(|ks| {
            let removed = match ks.data.get_mut(key) {
                None => return Ok(false),
                Some(Entry::SortedSet(zset)) => zset.remove(member),
                Some(_) => return Err(wrong_type(key)),
            };
            ks.prune(key);
            Ok(removed)
        })
    }

    fn zscore(&mut self, key: &str, member: &str) -> StoreResult<Option<f64>> {
        self.with_zset(key, |zset| zset.score(member))
    }

    fn zcard(&mut self, key: &str) -> StoreResult<u64> {
        self.with_zset(key, |zset| zset.len() as u64)
    }

    fn zscan(
        &mut self,
        key: &str,
        cursor: u64,
        pattern: Option<&str>,
        count: usize,
    ) -> StoreResult<ScanPage<(String, f64)>> {
        let entries = self.with_zset(key, SortedSet::entries)?;
        let (window, cursor) = scan_window(&entries, cursor, count);
        let items = window
            .into_iter()
            .filter(|(member, _)| pattern.map_or(true, |p| glob_match(p, member)))
            .collect();
        Ok(ScanPage { cursor, items })
    }

    fn zrange_by_score(
        &mut self,
        key: &str,
        range: ScoreRange,
        order: Order,
        limit: Limit,
    ) -> StoreResult<Vec<String>> {
        self.with_zset(key, |zset| zset.range_by_score(range, order, limit))
    }

    fn zrange_by_lex(
        &mut self,
        key: &str,
        range: LexRange,
        order: Order,
        limit: Limit,
    ) -> StoreResult<Vec<String>> {
        self.with_zset(key, |zset| zset.range_by_lex(&range, order, limit))
    }

    fn scan(
        &mut self,
        cursor: u64,
        pattern: Option<&str>,
        count: usize,
    ) -> StoreResult<ScanPage<String>> {
        let mut keys: Vec<String> = self.read(|ks| Ok(ks.data.keys().cloned().collect()))?;
        keys.sort_unstable();
        let (window, cursor) = scan_window(&keys, cursor, count);
        let items = window
            .into_iter()
            .filter(|key| pattern.map_or(true, |p| glob_match(p, key)))
            .collect();
        Ok(ScanPage { cursor, items })
    }

    fn del(&mut self, key: &str) -> StoreResult<bool> {
        self.write(|ks| Ok(ks.data.remove(key).is_some()))
    }
}

/// Connection pool over a shared [`MemoryStore`]
///
/// Returned connections are reset to database 0 and kept for reuse up to
/// `max_idle`; `max_active` caps the number on loan.
#[derive(Debug)]
pub struct MemoryPool {
    store: Arc<MemoryStore>,
    idle: Mutex<Vec<MemoryConnection>>,
    active: AtomicUsize,
}

impl MemoryPool {
    /// Create a pool over a fresh default store
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Create a pool over a fresh store with `config`
    pub fn with_config(config: MemoryConfig) -> Self {
        Self::with_store(Arc::new(MemoryStore::with_config(config)))
    }

    /// Create a pool over an existing store
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            idle: Mutex::new(Vec::new()),
            active: AtomicUsize::new(0),
        }
    }

    /// The shared store
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// Connections currently on loan
    pub fn active_count(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Connections waiting for reuse
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }
}

impl Default for MemoryPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionPool for MemoryPool {
    type Connection = MemoryConnection;

    fn checkout(&self) -> StoreResult<MemoryConnection> {
        let max_active = self.store.config.max_active;
        let reserved = self
            .active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |active| {
                (max_active == 0 || active < max_active).then_some(active + 1)
            });
        if reserved.is_err() {
            return Err(StoreError::PoolExhausted { max_active });
        }

        let conn = self.idle.lock().pop();
        Ok(conn.unwrap_or_else(|| self.store.connect()))
    }

    fn checkin(&self, mut conn: MemoryConnection) {
        self.active.fetch_sub(1, Ordering::AcqRel);
        conn.database = 0;

        let mut idle = self.idle.lock();
        if idle.len() < self.store.config.max_idle {
            idle.push(conn);
        } else {
            trace!("idle pool full, closing connection");
        }
    }
}
