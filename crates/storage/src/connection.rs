//! The key-value command surface consumed by the engine
//!
//! [`KvConnection`] mirrors the Redis commands the record store needs, with
//! typed arguments and replies. Implementations issue one blocking round trip
//! per call; timeouts and retries are theirs to define.

use crate::error::StoreResult;
use tablekv_core::Order;

/// One page of a cursor scan
///
/// A `cursor` of 0 means the iteration is complete. A page may be empty while
/// the iteration is still in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPage<T> {
    /// Cursor for the next call
    pub cursor: u64,
    /// Items found in this page
    pub items: Vec<T>,
}

impl<T> ScanPage<T> {
    /// Whether this is the final page
    pub fn is_last(&self) -> bool {
        self.cursor == 0
    }
}

/// Inclusive score interval for `ZRANGE ... BYSCORE`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    /// Lowest score included
    pub min: f64,
    /// Highest score included
    pub max: f64,
}

impl ScoreRange {
    /// Every score: `-inf` to `+inf`
    pub const fn all() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    /// Whether `score` lies inside the interval
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}

/// One end of a lexicographic interval (`-`, `+`, `[x`, `(x`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexBound {
    /// `-`: below every member
    Min,
    /// `+`: above every member
    Max,
    /// `[x`: includes `x`
    Inclusive(String),
    /// `(x`: excludes `x`
    Exclusive(String),
}

/// Lexicographic interval for `ZRANGE ... BYLEX`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexRange {
    /// Lower end
    pub min: LexBound,
    /// Upper end
    pub max: LexBound,
}

impl LexRange {
    /// Every member: `-` to `+`
    pub const fn all() -> Self {
        Self {
            min: LexBound::Min,
            max: LexBound::Max,
        }
    }

    /// Whether `member` lies inside the interval (byte order)
    pub fn contains(&self, member: &str) -> bool {
        let above_min = match &self.min {
            LexBound::Min => true,
            LexBound::Max => false,
            LexBound::Inclusive(x) => member.as_bytes() >= x.as_bytes(),
            LexBound::Exclusive(x) => member.as_bytes() > x.as_bytes(),
        };
        let below_max = match &self.max {
            LexBound::Min => false,
            LexBound::Max => true,
            LexBound::Inclusive(x) => member.as_bytes() <= x.as_bytes(),
            LexBound::Exclusive(x) => member.as_bytes() < x.as_bytes(),
        };
        above_min && below_max
    }
}

/// `LIMIT offset count` for range queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limit {
    /// Entries skipped from the start of the walk
    pub offset: usize,
    /// Maximum entries returned; `None` returns everything after `offset`
    pub count: Option<usize>,
}

impl Limit {
    /// Skip `offset`, then take at most `count`
    pub const fn new(offset: usize, count: usize) -> Self {
        Self {
            offset,
            count: Some(count),
        }
    }

    /// No windowing
    pub const fn none() -> Self {
        Self {
            offset: 0,
            count: None,
        }
    }

    /// Apply the window to an iterator
    pub fn apply<I: Iterator>(&self, iter: I) -> impl Iterator<Item = I::Item> {
        iter.skip(self.offset).take(self.count.unwrap_or(usize::MAX))
    }
}

/// A connection to a Redis-compatible key-value store
///
/// Command names follow Redis. Empty collections do not exist: removing the
/// last element of a hash, set, or sorted set deletes its key, and reading a
/// missing key yields an empty reply.
pub trait KvConnection: Send {
    /// `SELECT database`
    fn select(&mut self, database: u64) -> StoreResult<()>;

    /// `HSET key field value [field value ...]`, returns the number of new fields
    fn hset(&mut self, key: &str, fields: &[(String, String)]) -> StoreResult<u64>;

    /// `HDEL key field [field ...]`, returns the number of removed fields
    fn hdel(&mut self, key: &str, fields: &[&str]) -> StoreResult<u64>;

    /// `HGETALL key`, in field insertion order
    fn hgetall(&mut self, key: &str) -> StoreResult<Vec<(String, String)>>;

    /// `SADD key member`, returns whether the member was added
    fn sadd(&mut self, key: &str, member: &str) -> StoreResult<bool>;

    /// `SREM key member`, returns whether the member was removed
    fn srem(&mut self, key: &str, member: &str) -> StoreResult<bool>;

    /// `SISMEMBER key member`
    fn sismember(&mut self, key: &str, member: &str) -> StoreResult<bool>;

    /// `SCARD key`
    fn scard(&mut self, key: &str) -> StoreResult<u64>;

    /// `SSCAN key cursor COUNT count`
    fn sscan(&mut self, key: &str, cursor: u64, count: usize) -> StoreResult<ScanPage<String>>;

    /// `ZADD key score member`, returns whether the member was added
    fn zadd(&mut self, key: &str, score: f64, member: &str) -> StoreResult<bool>;

    /// `ZREM key member`, returns whether the member was removed
    fn zrem(&mut self, key: &str, member: &str) -> StoreResult<bool>;

    /// `ZSCORE key member`
    fn zscore(&mut self, key: &str, member: &str) -> StoreResult<Option<f64>>;

    /// `ZCARD key`
    fn zcard(&mut self, key: &str) -> StoreResult<u64>;

    /// `ZSCAN key cursor [MATCH pattern] COUNT count`
    fn zscan(
        &mut self,
        key: &str,
        cursor: u64,
        pattern: Option<&str>,
        count: usize,
    ) -> StoreResult<ScanPage<(String, f64)>>;

    /// `ZRANGE key min max BYSCORE [REV] [LIMIT offset count]`
    ///
    /// Ties are ordered by member bytes (reversed under `Descending`).
    fn zrange_by_score(
        &mut self,
        key: &str,
        range: ScoreRange,
        order: Order,
        limit: Limit,
    ) -> StoreResult<Vec<String>>;

    /// `ZRANGE key min max BYLEX [REV] [LIMIT offset count]`
    ///
    /// Only meaningful when every member shares one score.
    fn zrange_by_lex(
        &mut self,
        key: &str,
        range: LexRange,
        order: Order,
        limit: Limit,
    ) -> StoreResult<Vec<String>>;

    /// `SCAN cursor [MATCH pattern] COUNT count` over the selected database
    fn scan(
        &mut self,
        cursor: u64,
        pattern: Option<&str>,
        count: usize,
    ) -> StoreResult<ScanPage<String>>;

    /// `DEL key`, returns whether the key existed
    fn del(&mut self, key: &str) -> StoreResult<bool>;
}
