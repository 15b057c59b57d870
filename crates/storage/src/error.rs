//! Store error type
//!
//! Every failure reported by a connection or a pool. The engine propagates
//! these unchanged; none of them is retried.

use thiserror::Error;

/// Failure talking to the key-value store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Connection could not be established or was lost
    #[error("connection error: {0}")]
    Connection(String),

    /// The store rejected the command
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Command used against a key holding another data type
    #[error("WRONGTYPE operation against key {key:?} holding the wrong kind of value")]
    WrongType {
        /// The offending key
        key: String,
    },

    /// Pool is at its active connection limit
    #[error("connection pool exhausted ({max_active} active)")]
    PoolExhausted {
        /// Configured limit
        max_active: usize,
    },
}

impl StoreError {
    /// Check if this is a wrong-type error
    pub fn is_wrong_type(&self) -> bool {
        matches!(self, StoreError::WrongType { .. })
    }
}

/// Result type for store commands
pub type StoreResult<T> = std::result::Result<T, StoreError>;
