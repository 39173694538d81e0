//! Process-wide hash stores
//!
//! Classpath resources and repository paths hash against separate stores.
//! Both are created lazily, seeded with the built-in prefixes, and shared
//! for the lifetime of the process.

use crate::code::HashCode;
use crate::store::HashStore;
use once_cell::sync::Lazy;

/// Built-in classpath prefixes and their codes
pub const CLASSPATH_SEEDS: &[(&str, &str)] = &[
    ("org/alfresco/repo/virtual/node", "1"),
    ("org/alfresco/repo/virtual/template", "2"),
    ("org/alfresco/repo/virtual", "3"),
];

/// Built-in repository path prefixes and their codes
pub const REPOSITORY_SEEDS: &[(&str, &str)] = &[
    ("/app:company_home/app:dictionary/app:smart_folders", "1"),
    ("/app:company_home/app:dictionary", "2"),
    ("/app:company_home", "3"),
];

static CLASSPATH_STORE: Lazy<HashStore> = Lazy::new(|| seeded("classpath", CLASSPATH_SEEDS));

static REPOSITORY_STORE: Lazy<HashStore> = Lazy::new(|| seeded("repository", REPOSITORY_SEEDS));

/// Store used for classpath resources
#[inline]
#[must_use]
pub fn classpath_store() -> &'static HashStore {
    &CLASSPATH_STORE
}

/// Store used for repository path resources
#[inline]
#[must_use]
pub fn repository_store() -> &'static HashStore {
    &REPOSITORY_STORE
}

fn seeded(name: &str, seeds: &[(&str, &str)]) -> HashStore {
    let store = HashStore::new(name);
    for (prefix, code) in seeds {
        let registered = code
            .parse::<HashCode>()
            .and_then(|code| store.put(prefix, code));
        if let Err(e) = registered {
            tracing::warn!(store = name, prefix, error = %e, "skipping built-in hash prefix");
        }
    }
    store
}
