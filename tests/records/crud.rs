//! Insert / get round trips and the stored layout

use crate::common::*;
use tablekv::prelude::*;

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn insert_then_get_returns_record() {
    let t = TestStore::new();
    let user = User {
        visits: 12,
        balance: -3.25,
        verified: true,
        email: Some("alice@example.com".to_string()),
        premium: Some(false),
        rank: Some(-4),
        rating: Some(4.5),
        last_login: Some(ts(2024, 6, 30)),
        ..User::new("alice", 30)
    };
    t.insert("1", &user);

    let loaded: User = t.store.get(TABLE, "1").unwrap();
    assert_eq!(loaded, user);
}

#[test]
fn invalid_nullables_round_trip_as_none() {
    let t = TestStore::new();
    let user = User::new("bob", 20);
    t.insert("2", &user);

    let loaded: User = t.store.get(TABLE, "2").unwrap();
    assert_eq!(loaded.email, None);
    assert_eq!(loaded.premium, None);
    assert_eq!(loaded.last_login, None);
    assert_eq!(loaded, user);
}

#[test]
fn get_unknown_id_is_not_found() {
    let t = TestStore::new();
    assert!(t.store.get::<User>(TABLE, "404").unwrap_err().is_not_found());
}

// ============================================================================
// Stored layout
// ============================================================================

#[test]
fn hash_uses_declaration_order_and_canonical_text() {
    let t = TestStore::new();
    let user = User {
        visits: 7,
        balance: 1.5,
        verified: true,
        rank: Some(3),
        ..User::new("carol", 41)
    };
    t.insert("3", &user);

    let fields = t.raw().hgetall("user:3").unwrap();
    let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec!["name", "age", "visits", "balance", "verified", "joined", "rank"]
    );

    let value = |name: &str| {
        fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .unwrap()
    };
    assert_eq!(value("age"), "41");
    assert_eq!(value("visits"), "7");
    assert_eq!(value("balance"), "1.5");
    assert_eq!(value("verified"), "true");
    assert_eq!(value("joined"), "2024-01-01T00:00:00.000000000Z");
}

#[test]
fn membership_set_tracks_ids() {
    let t = TestStore::new();
    t.insert("1", &User::new("a", 1));
    t.insert("2", &User::new("b", 2));
    t.insert("1", &User::new("a2", 3));

    let mut raw = t.raw();
    assert_eq!(raw.scard("user:index:id").unwrap(), 2);
    assert!(t.store.exists(TABLE, "1").unwrap());
    assert!(!t.store.exists(TABLE, "3").unwrap());
    assert_eq!(t.store.count(TABLE).unwrap(), 2);
}

#[test]
fn tables_do_not_share_keys() {
    let t = TestStore::new();
    t.insert("1", &User::new("a", 1));
    t.store
        .insert("users", "1", &User::new("b", 2), &indexes())
        .unwrap();

    t.store.clear_table(TABLE).unwrap();
    let other: User = t.store.get("users", "1").unwrap();
    assert_eq!(other.name, "b");
}

#[test]
fn selected_database_is_isolated() {
    let t = TestStore::with_config(EngineConfig::new().database(3));
    t.insert("1", &User::new("a", 1));

    let mut db0 = t.store.pool().store().connect();
    assert_eq!(db0.scard("user:index:id").unwrap(), 0);
    assert_eq!(t.raw().scard("user:index:id").unwrap(), 1);
}
