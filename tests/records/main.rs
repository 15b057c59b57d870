//! Record Store Integration Tests
//!
//! End-to-end tests for tablekv against the in-memory backend: keyspace
//! layout, listings, index upkeep, error propagation.

#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod crud;
mod failures;
mod properties;
mod schema_evolution;
