//! Shared helpers for the integration suites

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use tablekv::prelude::*;
use tablekv::{MemoryConfig, MemoryConnection};

pub const TABLE: &str = "user";

/// Install a test-writer subscriber once; `RUST_LOG` controls verbosity
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub name: String,
    pub age: i64,
    pub visits: u64,
    pub balance: f64,
    pub verified: bool,
    pub joined: DateTime<Utc>,
    pub email: Option<String>,
    pub premium: Option<bool>,
    pub rank: Option<i64>,
    pub rating: Option<f64>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(name: &str, age: i64) -> Self {
        Self {
            name: name.to_string(),
            age,
            joined: ts(2024, 1, 1),
            ..Self::default()
        }
    }
}

static USER_SCHEMA: Lazy<Schema<User>> = Lazy::new(|| {
    Schema::new(vec![
        Field::text("name", |u: &User| u.name.as_str(), |u: &mut User, v| u.name = v),
        Field::int("age", |u: &User| u.age, |u: &mut User, v| u.age = v),
        Field::uint("visits", |u: &User| u.visits, |u: &mut User, v| u.visits = v),
        Field::float("balance", |u: &User| u.balance, |u: &mut User, v| u.balance = v),
        Field::bool("verified", |u: &User| u.verified, |u: &mut User, v| u.verified = v),
        Field::timestamp("joined", |u: &User| u.joined, |u: &mut User, v| u.joined = v),
        Field::nullable_text(
            "email",
            |u: &User| u.email.as_deref(),
            |u: &mut User, v| u.email = v,
        ),
        Field::nullable_bool("premium", |u: &User| u.premium, |u: &mut User, v| u.premium = v),
        Field::nullable_int("rank", |u: &User| u.rank, |u: &mut User, v| u.rank = v),
        Field::nullable_float("rating", |u: &User| u.rating, |u: &mut User, v| u.rating = v),
        Field::nullable_timestamp(
            "last_login",
            |u: &User| u.last_login,
            |u: &mut User, v| u.last_login = v,
        ),
    ])
});

impl Record for User {
    fn schema() -> &'static Schema<Self> {
        &USER_SCHEMA
    }
}

/// A later revision of [`User`]: one field dropped, one added
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserV2 {
    pub name: String,
    pub country: String,
}

static USER_V2_SCHEMA: Lazy<Schema<UserV2>> = Lazy::new(|| {
    Schema::new(vec![
        Field::text("name", |u: &UserV2| u.name.as_str(), |u: &mut UserV2, v| u.name = v),
        Field::text(
            "country",
            |u: &UserV2| u.country.as_str(),
            |u: &mut UserV2, v| u.country = v,
        ),
    ])
});

impl Record for UserV2 {
    fn schema() -> &'static Schema<Self> {
        &USER_V2_SCHEMA
    }
}

pub fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn age_index() -> IndexDescriptor {
    IndexDescriptor::numeric("age")
}

pub fn name_index() -> IndexDescriptor {
    IndexDescriptor::lexicographic("name")
}

pub fn indexes() -> Vec<IndexDescriptor> {
    vec![age_index(), name_index()]
}

/// A store over a fresh in-memory backend
pub struct TestStore {
    pub store: RecordStore<MemoryPool>,
}

impl TestStore {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        init_tracing();
        Self {
            store: RecordStore::with_config(MemoryPool::with_config(MemoryConfig::new()), config),
        }
    }

    /// Direct connection on the store's database, bypassing the engine
    pub fn raw(&self) -> MemoryConnection {
        let mut conn = self.store.pool().store().connect();
        conn.select(self.store.config().database).unwrap();
        conn
    }

    pub fn insert(&self, id: &str, user: &User) {
        self.store.insert(TABLE, id, user, &indexes()).unwrap();
    }

    pub fn names(page: &Page<User>) -> Vec<String> {
        page.records.iter().map(|u| u.name.clone()).collect()
    }
}
