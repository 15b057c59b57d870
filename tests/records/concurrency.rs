//! Concurrent callers sharing one store

use crate::common::*;
use std::sync::Arc;
use std::thread;
use tablekv::prelude::*;

#[test]
fn parallel_inserts_on_distinct_ids() {
    let t = Arc::new(TestStore::new());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                for i in 0..25 {
                    let id = format!("{}-{}", worker, i);
                    t.insert(&id, &User::new(&id, worker * 100 + i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(t.store.count(TABLE).unwrap(), 200);
    let page: Page<User> = t
        .store
        .list_sorted(TABLE, &age_index(), Order::Ascending, 200, 0)
        .unwrap();
    let ages: Vec<i64> = page.records.iter().map(|u| u.age).collect();
    let mut sorted = ages.clone();
    sorted.sort_unstable();
    assert_eq!(ages, sorted);
    assert_eq!(t.store.pool().active_count(), 0);
}

#[test]
fn readers_run_alongside_writers() {
    let t = Arc::new(TestStore::new());
    t.insert("seed", &User::new("seed", 0));

    let writer = {
        let t = Arc::clone(&t);
        thread::spawn(move || {
            for i in 0..100 {
                t.insert(&format!("w{}", i), &User::new("w", i));
            }
        })
    };
    let reader = {
        let t = Arc::clone(&t);
        thread::spawn(move || {
            for _ in 0..50 {
                let page: Page<User> = t.store.list_all(TABLE).unwrap();
                assert!(page.total >= 1);
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(t.store.count(TABLE).unwrap(), 101);
}
