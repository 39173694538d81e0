//! HashStore behaviour under concurrent use and arbitrary paths

use proptest::prelude::*;
use std::sync::Arc;
use std::thread;
use vref_hash::{HashCode, HashStore};

fn seeded() -> HashStore {
    let store = HashStore::new("props");
    store.put("a", "1".parse::<HashCode>().unwrap()).unwrap();
    store.put("a/b", "2".parse::<HashCode>().unwrap()).unwrap();
    store.put("/x/y", "3".parse::<HashCode>().unwrap()).unwrap();
    store
}

#[test]
fn concurrent_registration_and_lookup() {
    let store = Arc::new(HashStore::new("concurrent"));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let prefix = format!("tenant{i}/templates");
                let code = store.put_derived(&prefix).unwrap();
                let hashed = store.hash(&format!("{prefix}/smart.json"));
                assert_eq!(hashed.code, Some(code));
                store.unhash(&hashed).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("tenant{i}/templates/smart.json"));
    }
    assert_eq!(store.len(), 8);
}

proptest! {
    #[test]
    fn hash_unhash_roundtrip(path in "(/?[abxy]{0,2}(/[abxy]{0,3}){0,4})") {
        let store = seeded();
        let hashed = store.hash(&path);
        prop_assert_eq!(store.unhash(&hashed).unwrap(), path);
    }

    #[test]
    fn hashed_remainder_is_never_empty(path in "[ab/]{0,8}") {
        let store = seeded();
        let hashed = store.hash(&path);
        if hashed.code.is_some() {
            prop_assert!(!hashed.remainder.is_empty());
        }
    }
}
