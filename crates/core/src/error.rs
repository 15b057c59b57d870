//! Error types for key construction
//!
//! Record encoding and decoding never fail: unparseable fields are skipped.
//! The only failures at this layer come from table names and identifiers that
//! cannot be mapped onto the keyspace without aliasing other keys.

use thiserror::Error;

/// Rejected table name or record identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Table namespace is empty
    #[error("table name must not be empty")]
    EmptyTable,

    /// Record identifier is empty
    #[error("record id must not be empty")]
    EmptyId,

    /// Identifier would collide with another key or index member
    #[error("invalid record id {id:?}: {reason}")]
    InvalidId {
        /// The rejected identifier
        id: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Index name would collide with the membership set or be unaddressable
    #[error("invalid index name {name:?}: {reason}")]
    InvalidIndex {
        /// The rejected index name
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// Result type for key construction
pub type KeyResult<T> = std::result::Result<T, KeyError>;
