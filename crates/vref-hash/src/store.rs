//! Path prefix hash store with radix tree
//!
//! Provides [`HashStore`], a bidirectional table between registered path
//! prefixes and their short [`HashCode`]s. Hashing a path replaces its
//! longest registered prefix with the prefix's code.

use crate::code::{HashCode, DERIVED_CODE_MIN_BYTES};
use parking_lot::RwLock;
use radix_trie::{Trie, TrieCommon};
use std::collections::HashMap;

const SEPARATOR: char = '/';

/// Path split into an optional prefix code and the remaining text
///
/// `code: None` means no registered prefix applied and `remainder` is the
/// whole path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashedPath {
    /// Code of the matched prefix
    pub code: Option<HashCode>,

    /// Path text after `prefix/`, or the whole path
    pub remainder: String,
}

impl HashedPath {
    /// Path that no prefix applies to
    #[inline]
    #[must_use]
    pub fn unhashed(path: impl Into<String>) -> Self {
        Self {
            code: None,
            remainder: path.into(),
        }
    }

    /// Path under the prefix registered as `code`
    #[inline]
    #[must_use]
    pub fn hashed(code: HashCode, remainder: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            remainder: remainder.into(),
        }
    }
}

/// Bidirectional prefix/code table
///
/// Prefix lookup uses a radix trie keyed by `prefix/`, so matches always end
/// on a segment boundary. Both directions sit behind one read-write lock.
#[derive(Debug)]
pub struct HashStore {
    name: String,
    tables: RwLock<Tables>,
}

#[derive(Debug)]
struct Tables {
    /// `prefix/` -> code
    by_prefix: Trie<String, HashCode>,

    /// code -> prefix
    by_code: HashMap<HashCode, String>,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            by_prefix: Trie::new(),
            by_code: HashMap::new(),
        }
    }
}

impl HashStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Store name, used in logs
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `prefix` under `code`
    ///
    /// Registering an identical pair again is a no-op.
    ///
    /// # Errors
    /// Returns error if the prefix is malformed, or if either side is
    /// already bound to something else
    pub fn put(&self, prefix: &str, code: HashCode) -> Result<(), HashStoreError> {
        validate_prefix(prefix)?;
        let key = trie_key(prefix);

        let mut tables = self.tables.write();
        if let Some(existing) = tables.by_prefix.get(&key) {
            if *existing == code {
                return Ok(());
            }
            return Err(HashStoreError::PrefixConflict {
                prefix: prefix.to_string(),
                existing: existing.to_string(),
                requested: code.to_string(),
            });
        }
        if let Some(existing) = tables.by_code.get(&code) {
            return Err(HashStoreError::CodeConflict {
                code: code.to_string(),
                existing: existing.clone(),
                requested: prefix.to_string(),
            });
        }

        tracing::debug!(store = %self.name, prefix, code = %code, "registered hash prefix");
        tables.by_prefix.insert(key, code.clone());
        tables.by_code.insert(code, prefix.to_string());
        Ok(())
    }

    /// Register `prefix` under a code derived from its digest
    ///
    /// Starts from [`DERIVED_CODE_MIN_BYTES`] digest bytes and grows by one
    /// byte while the candidate is taken. Returns the existing code if the
    /// prefix is already registered.
    ///
    /// # Errors
    /// Returns error if the prefix is malformed or every candidate is taken
    pub fn put_derived(&self, prefix: &str) -> Result<HashCode, HashStoreError> {
        validate_prefix(prefix)?;
        let key = trie_key(prefix);

        let mut tables = self.tables.write();
        if let Some(existing) = tables.by_prefix.get(&key) {
            return Ok(existing.clone());
        }
        let code = (DERIVED_CODE_MIN_BYTES..=32)
            .map(|bytes| HashCode::derive(prefix, bytes))
            .find(|candidate| !tables.by_code.contains_key(candidate))
            .ok_or_else(|| HashStoreError::Exhausted(prefix.to_string()))?;

        tracing::debug!(store = %self.name, prefix, code = %code, "registered derived hash prefix");
        tables.by_prefix.insert(key, code.clone());
        tables.by_code.insert(code.clone(), prefix.to_string());
        Ok(code)
    }

    /// Hash `path` against the registered prefixes
    ///
    /// Picks the longest prefix `P` such that `path` starts with `P/` and
    /// the remainder is non-empty.
    #[must_use]
    pub fn hash(&self, path: &str) -> HashedPath {
        let tables = self.tables.read();
        let mut candidate = path;
        while let Some(ancestor) = tables.by_prefix.get_ancestor(candidate) {
            let (Some(key), Some(code)) = (ancestor.key(), ancestor.value()) else {
                break;
            };
            let remainder = &path[key.len()..];
            if !remainder.is_empty() {
                tracing::trace!(store = %self.name, path, code = %code, "hashed path");
                return HashedPath::hashed(code.clone(), remainder);
            }
            // `path` is exactly `P/`; retry with shorter prefixes
            candidate = &path[..key.len() - 1];
        }
        HashedPath::unhashed(path)
    }

    /// Prefix registered under `code`
    #[must_use]
    pub fn lookup(&self, code: &str) -> Option<String> {
        self.tables.read().by_code.get(code).cloned()
    }

    /// Code registered for `prefix`
    #[must_use]
    pub fn code_of(&self, prefix: &str) -> Option<HashCode> {
        let tables = self.tables.read();
        tables.by_prefix.get(&trie_key(prefix)).cloned()
    }

    /// Rebuild the path a [`HashedPath`] stands for
    ///
    /// # Errors
    /// Returns error if the code is not registered
    pub fn unhash(&self, hashed: &HashedPath) -> Result<String, HashStoreError> {
        match &hashed.code {
            None => Ok(hashed.remainder.clone()),
            Some(code) => {
                let tables = self.tables.read();
                let prefix = tables
                    .by_code
                    .get(code)
                    .ok_or_else(|| HashStoreError::UnknownCode {
                        store: self.name.clone(),
                        code: code.to_string(),
                    })?;
                Ok(format!("{prefix}{SEPARATOR}{}", hashed.remainder))
            }
        }
    }

    /// All registrations, sorted by prefix
    #[must_use]
    pub fn entries(&self) -> Vec<(String, HashCode)> {
        let tables = self.tables.read();
        let mut entries: Vec<_> = tables
            .by_code
            .iter()
            .map(|(code, prefix)| (prefix.clone(), code.clone()))
            .collect();
        entries.sort();
        entries
    }

    /// Number of registered prefixes
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.read().by_code.len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn trie_key(prefix: &str) -> String {
    let mut key = String::with_capacity(prefix.len() + 1);
    key.push_str(prefix);
    key.push(SEPARATOR);
    key
}

fn validate_prefix(prefix: &str) -> Result<(), HashStoreError> {
    let trimmed = prefix.strip_prefix(SEPARATOR).unwrap_or(prefix);
    if trimmed.is_empty() || trimmed.split(SEPARATOR).any(str::is_empty) {
        return Err(HashStoreError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

/// Errors from hash store registration and lookup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashStoreError {
    /// Prefix empty, ending in `/` or containing an empty segment
    #[error("invalid hash prefix: '{0}'")]
    InvalidPrefix(String),

    /// Code not alphanumeric
    #[error("invalid hash code: '{0}' (must be ascii alphanumeric)")]
    InvalidCode(String),

    /// Prefix already bound to another code
    #[error("prefix '{prefix}' already registered as '{existing}', cannot register as '{requested}'")]
    PrefixConflict {
        prefix: String,
        existing: String,
        requested: String,
    },

    /// Code already bound to another prefix
    #[error("code '{code}' already registered for '{existing}', cannot register '{requested}'")]
    CodeConflict {
        code: String,
        existing: String,
        requested: String,
    },

    /// No free derived code
    #[error("no free derived code for prefix '{0}'")]
    Exhausted(String),

    /// Code not registered
    #[error("unknown code '{code}' in {store} hash store")]
    UnknownCode { store: String, code: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> HashCode {
        s.parse().unwrap()
    }

    fn store() -> HashStore {
        let store = HashStore::new("test");
        store.put("org/alfresco", code("1")).unwrap();
        store.put("org/alfresco/repo/virtual", code("2")).unwrap();
        store
    }

    #[test]
    fn longest_prefix_wins() {
        let store = store();
        assert_eq!(
            store.hash("org/alfresco/repo/virtual/node/smart.json"),
            HashedPath::hashed(code("2"), "node/smart.json")
        );
        assert_eq!(
            store.hash("org/alfresco/other.json"),
            HashedPath::hashed(code("1"), "other.json")
        );
    }

    #[test]
    fn match_ends_on_segment_boundary() {
        let store = store();
        assert_eq!(
            store.hash("org/alfrescoX/file.json"),
            HashedPath::unhashed("org/alfrescoX/file.json")
        );
    }

    #[test]
    fn bare_prefix_is_not_hashed() {
        let store = store();
        assert_eq!(store.hash("org/alfresco"), HashedPath::unhashed("org/alfresco"));
    }

    #[test]
    fn trailing_separator_falls_back_to_shorter_prefix() {
        let store = store();
        assert_eq!(
            store.hash("org/alfresco/repo/virtual/"),
            HashedPath::hashed(code("1"), "repo/virtual/")
        );
    }

    #[test]
    fn unhash_roundtrip() {
        let store = store();
        for path in [
            "org/alfresco/repo/virtual/node/smart.json",
            "org/alfresco/x",
            "com/example/t.json",
            "",
        ] {
            let hashed = store.hash(path);
            assert_eq!(store.unhash(&hashed).unwrap(), path);
        }
    }

    #[test]
    fn unknown_code() {
        let store = store();
        let err = store.unhash(&HashedPath::hashed(code("9"), "x")).unwrap_err();
        assert!(matches!(err, HashStoreError::UnknownCode { .. }));
    }

    #[test]
    fn identical_registration_is_noop() {
        let store = store();
        store.put("org/alfresco", code("1")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn conflicts_are_rejected() {
        let store = store();
        assert!(matches!(
            store.put("org/alfresco", code("3")),
            Err(HashStoreError::PrefixConflict { .. })
        ));
        assert!(matches!(
            store.put("com/example", code("1")),
            Err(HashStoreError::CodeConflict { .. })
        ));
    }

    #[test]
    fn invalid_prefixes() {
        let store = HashStore::new("test");
        for bad in ["", "/", "a/", "a//b"] {
            assert!(matches!(
                store.put(bad, code("1")),
                Err(HashStoreError::InvalidPrefix(_))
            ));
        }
        assert!(store.put("/rooted/path", code("1")).is_ok());
    }

    #[test]
    fn derived_codes() {
        let store = HashStore::new("test");
        let first = store.put_derived("com/example/templates").unwrap();
        assert_eq!(first.as_str().len(), 6);
        assert_eq!(store.put_derived("com/example/templates").unwrap(), first);
        assert_eq!(store.lookup(first.as_str()).as_deref(), Some("com/example/templates"));
        assert_eq!(store.code_of("com/example/templates"), Some(first));
    }

    #[test]
    fn derived_code_grows_on_collision() {
        let store = HashStore::new("test");
        let taken = HashCode::derive("com/example", DERIVED_CODE_MIN_BYTES);
        store.put("elsewhere", taken.clone()).unwrap();
        let derived = store.put_derived("com/example").unwrap();
        assert_ne!(derived, taken);
        assert_eq!(derived.as_str().len(), 8);
        assert!(derived.as_str().starts_with(taken.as_str()));
    }

    #[test]
    fn entries_sorted() {
        let store = store();
        let prefixes: Vec<_> = store.entries().into_iter().map(|(p, _)| p).collect();
        assert_eq!(prefixes, vec!["org/alfresco", "org/alfresco/repo/virtual"]);
    }
}
