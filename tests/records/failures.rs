//! Store failures and invalid input

use crate::common::*;
use std::sync::Arc;
use tablekv::prelude::*;
use tablekv::{KeyError, MemoryConfig, MemoryStore, StoreError};

fn corrupt(t: &TestStore, key: &str) {
    let mut raw = t.raw();
    raw.del(key).unwrap();
    raw.hset(key, &[("oops".to_string(), "1".to_string())]).unwrap();
}

#[test]
fn wrong_type_membership_propagates() {
    let t = TestStore::new();
    corrupt(&t, "user:index:id");

    let err = t.store.list_all::<User>(TABLE).unwrap_err();
    assert!(err.is_store());
    assert!(matches!(err, Error::Store(StoreError::WrongType { ref key }) if key == "user:index:id"));

    let err = t.store.insert(TABLE, "1", &User::new("a", 1), &indexes()).unwrap_err();
    assert!(err.is_store());
}

#[test]
fn wrong_type_index_propagates() {
    let t = TestStore::new();
    t.insert("1", &User::new("alice", 30));
    corrupt(&t, "user:index:age");

    let err = t
        .store
        .list_sorted::<User>(TABLE, &age_index(), Order::Ascending, 10, 0)
        .unwrap_err();
    assert!(err.is_store());
    assert!(!err.is_not_found());

    assert!(t.store.delete(TABLE, "1", &indexes()).unwrap_err().is_store());
}

#[test]
fn wrong_type_record_propagates() {
    let t = TestStore::new();
    t.raw().sadd("user:1", "x").unwrap();
    assert!(t.store.get::<User>(TABLE, "1").unwrap_err().is_store());
}

#[test]
fn pool_exhaustion_is_store_error() {
    let pool = MemoryPool::with_store(Arc::new(MemoryStore::with_config(
        MemoryConfig::new().max_active(1),
    )));
    let store = RecordStore::new(pool);
    let _held = store.pool().acquire().unwrap();

    let err = store.count(TABLE).unwrap_err();
    assert!(matches!(
        err,
        Error::Store(StoreError::PoolExhausted { max_active: 1 })
    ));
}

#[test]
fn invalid_ids_rejected_before_store() {
    let t = TestStore::new();
    let user = User::new("a", 1);

    for id in ["", "a:b", "index:age"] {
        let err = t.store.insert(TABLE, id, &user, &indexes()).unwrap_err();
        assert!(matches!(err, Error::InvalidKey(_)), "id {:?}", id);
    }
    assert!(matches!(
        t.store.get::<User>("", "1").unwrap_err(),
        Error::InvalidKey(KeyError::EmptyTable)
    ));
    assert_eq!(t.store.pool().store().key_count(0), 0);
}

#[test]
fn index_named_like_membership_set_rejected() {
    let t = TestStore::new();
    let id_index = IndexDescriptor::numeric("id");

    let err = t
        .store
        .insert(TABLE, "1", &User::new("a", 1), &[id_index.clone()])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidKey(KeyError::InvalidIndex { .. })));
    // Nothing was written for the rejected insert
    assert_eq!(t.store.pool().store().key_count(0), 0);

    t.insert("1", &User::new("a", 1));
    let err = t
        .store
        .list_sorted::<User>(TABLE, &id_index, Order::Ascending, 10, 0)
        .unwrap_err();
    assert!(err.is_invalid_key());

    let err = t.store.delete(TABLE, "1", &[id_index]).unwrap_err();
    assert!(err.is_invalid_key());
    assert!(t.store.exists(TABLE, "1").unwrap());
}

#[test]
fn empty_index_name_rejected() {
    let t = TestStore::new();
    let err = t
        .store
        .insert(TABLE, "1", &User::new("a", 1), &[IndexDescriptor::lexicographic("")])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidKey(KeyError::InvalidIndex { .. })));
    assert_eq!(t.store.count(TABLE).unwrap(), 0);
}
