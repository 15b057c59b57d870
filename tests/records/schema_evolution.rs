//! Decoding stored hashes written by other record shapes or clients

use crate::common::*;
use tablekv::prelude::*;

#[test]
fn unknown_fields_are_ignored() {
    let t = TestStore::new();
    let v2 = UserV2 {
        name: "alice".to_string(),
        country: "NZ".to_string(),
    };
    t.store.insert(TABLE, "1", &v2, &[]).unwrap();

    let loaded: User = t.store.get(TABLE, "1").unwrap();
    assert_eq!(loaded.name, "alice");
    assert_eq!(loaded.age, 0);
}

#[test]
fn missing_fields_keep_defaults() {
    let t = TestStore::new();
    t.insert("1", &User::new("alice", 30));

    let loaded: UserV2 = t.store.get(TABLE, "1").unwrap();
    assert_eq!(loaded.name, "alice");
    assert_eq!(loaded.country, "");
}

#[test]
fn unparseable_values_are_skipped() {
    let t = TestStore::new();
    t.raw()
        .hset(
            "user:1",
            &[
                ("name".to_string(), "alice".to_string()),
                ("age".to_string(), "thirty".to_string()),
                ("verified".to_string(), "T".to_string()),
                ("rank".to_string(), "1.5".to_string()),
                ("joined".to_string(), "2024-03-01T10:00:00+02:00".to_string()),
            ],
        )
        .unwrap();

    let loaded: User = t.store.get(TABLE, "1").unwrap();
    assert_eq!(loaded.name, "alice");
    assert_eq!(loaded.age, 0);
    assert!(loaded.verified);
    assert_eq!(loaded.rank, None);
    assert_eq!(loaded.joined.to_rfc3339(), "2024-03-01T08:00:00+00:00");
}

#[test]
fn reinsert_keeps_fields_outside_schema() {
    let t = TestStore::new();
    let v2 = UserV2 {
        name: "alice".to_string(),
        country: "NZ".to_string(),
    };
    t.store.insert(TABLE, "1", &v2, &[]).unwrap();
    t.insert("1", &User::new("alice", 30));

    let loaded: UserV2 = t.store.get(TABLE, "1").unwrap();
    assert_eq!(loaded.country, "NZ");
}
