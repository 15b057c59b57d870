//! Core types for tablekv
//!
//! This crate holds everything that does not talk to the store:
//! - [`Schema`] / [`Field`] / [`Record`]: explicit field-descriptor tables
//! - [`codec`]: record <-> flat hash mapping, index side values
//! - [`IndexDescriptor`]: secondary index declarations
//! - [`TableKeys`]: the keyspace layout

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod index;
pub mod keys;
pub mod schema;
pub mod value;

pub use codec::{decode, decode_with, encode, encode_with, Encoded, IndexEntry};
pub use error::{KeyError, KeyResult};
pub use index::{IndexDescriptor, IndexKind, Order};
pub use keys::TableKeys;
pub use schema::{Accessor, Field, Record, Schema};
pub use value::{FieldKind, FieldValue};
