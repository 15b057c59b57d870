//! Engine error type
//!
//! Callers must be able to tell "nothing there" apart from "store
//! unreachable", so empty results are always [`Error::NotFound`] and store
//! failures are always [`Error::Store`].

use tablekv_core::KeyError;
use tablekv_storage::StoreError;
use thiserror::Error;

/// All record store errors
#[derive(Debug, Error)]
pub enum Error {
    /// Record hash, membership set, index, or table is empty
    #[error("not found: {0}")]
    NotFound(String),

    /// The store failed or rejected a command
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Table name or record id cannot be mapped onto the keyspace
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),
}

/// Result type for record store operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this error came from the store
    pub fn is_store(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Check if this is an invalid key error
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Error::InvalidKey(_))
    }
}
