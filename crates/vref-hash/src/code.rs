//! Short codes standing in for path prefixes

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Number of digest bytes a derived code starts with
pub const DERIVED_CODE_MIN_BYTES: usize = 3;

/// Short code standing in for a registered path prefix
///
/// Non-empty ASCII alphanumeric, so it can sit inside URL-native encodings
/// without escaping.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HashCode(String);

impl HashCode {
    /// Code derived from the blake3 digest of `prefix`
    ///
    /// Uses the first `bytes` digest bytes as lowercase hex (clamped to 1..=32).
    #[must_use]
    pub fn derive(prefix: &str, bytes: usize) -> Self {
        let digest = blake3::hash(prefix.as_bytes());
        let n = bytes.clamp(1, 32);
        Self(hex::encode(&digest.as_bytes()[..n]))
    }

    /// Code text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether `s` is a well-formed code
    #[inline]
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric())
    }
}

impl Display for HashCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HashCode {
    type Err = crate::HashStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(crate::HashStoreError::InvalidCode(s.to_string()))
        }
    }
}

impl TryFrom<String> for HashCode {
    type Error = crate::HashStoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HashCode> for String {
    fn from(code: HashCode) -> Self {
        code.0
    }
}

impl Borrow<str> for HashCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for HashCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
