//! Records shared by the unit tests

use once_cell::sync::Lazy;
use std::sync::Arc;
use tablekv_core::{Field, IndexDescriptor, Record, Schema};
use tablekv_storage::{MemoryPool, MemoryStore};

use crate::{EngineConfig, RecordStore};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub name: String,
    pub age: i64,
    pub active: bool,
    pub nickname: Option<String>,
}

impl User {
    pub fn new(name: &str, age: i64) -> Self {
        Self {
            name: name.to_string(),
            age,
            active: true,
            nickname: None,
        }
    }
}

static USER_SCHEMA: Lazy<Schema<User>> = Lazy::new(|| {
    Schema::new(vec![
        Field::text("name", |u: &User| u.name.as_str(), |u: &mut User, v| u.name = v),
        Field::int("age", |u: &User| u.age, |u: &mut User, v| u.age = v),
        Field::bool("active", |u: &User| u.active, |u: &mut User, v| u.active = v),
        Field::nullable_text(
            "nickname",
            |u: &User| u.nickname.as_deref(),
            |u: &mut User, v| u.nickname = v,
        ),
    ])
});

impl Record for User {
    fn schema() -> &'static Schema<Self> {
        &USER_SCHEMA
    }
}

pub fn age_index() -> IndexDescriptor {
    IndexDescriptor::numeric("age")
}

pub fn name_index() -> IndexDescriptor {
    IndexDescriptor::lexicographic("name")
}

pub fn user_indexes() -> Vec<IndexDescriptor> {
    vec![age_index(), name_index()]
}

pub fn store() -> RecordStore<MemoryPool> {
    RecordStore::new(MemoryPool::new())
}

pub fn store_with(config: EngineConfig) -> RecordStore<MemoryPool> {
    RecordStore::with_config(MemoryPool::with_store(Arc::new(MemoryStore::new())), config)
}
