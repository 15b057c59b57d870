//! Property tests over the engine

use crate::common::*;
use proptest::prelude::*;
use tablekv::prelude::*;

fn user_strategy() -> impl Strategy<Value = User> {
    (
        "[a-z]{0,8}",
        any::<i64>(),
        any::<u64>(),
        -1.0e12f64..1.0e12,
        any::<bool>(),
        proptest::option::of("[a-z@.]{1,12}"),
        proptest::option::of(any::<i32>()),
    )
        .prop_map(|(name, age, visits, balance, verified, email, rank)| User {
            name,
            age,
            visits,
            balance,
            verified,
            email,
            rank: rank.map(i64::from),
            ..User::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn insert_get_round_trip(user in user_strategy()) {
        let t = TestStore::new();
        t.store.insert(TABLE, "1", &user, &indexes()).unwrap();
        let loaded: User = t.store.get(TABLE, "1").unwrap();
        prop_assert_eq!(loaded, user);
    }

    #[test]
    fn sorted_page_matches_model(
        ages in proptest::collection::vec(-1000i64..1000, 1..30),
        limit in 0usize..40,
        offset in 0usize..40,
        descending in any::<bool>(),
    ) {
        let t = TestStore::new();
        let mut model: Vec<(i64, String)> = Vec::new();
        for (i, age) in ages.iter().enumerate() {
            let id = format!("{:03}", i);
            t.insert(&id, &User::new(&id, *age));
            model.push((*age, id));
        }
        model.sort();
        if descending {
            model.reverse();
        }

        let page: Page<User> = t
            .store
            .list_sorted(TABLE, &age_index(), Order::from_desc(descending), limit, offset)
            .unwrap();

        prop_assert_eq!(page.total, ages.len() as u64);
        let expected: Vec<String> = model.into_iter().skip(offset).take(limit).map(|(_, id)| id).collect();
        prop_assert_eq!(TestStore::names(&page), expected);
    }
}
