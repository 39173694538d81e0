//! Error types for the reference codecs
//!
//! Provides error handling for:
//! - Parse operations (string → Reference)
//! - Stringify operations (Reference → string)
//! - Codec configuration loading

use crate::encoding::Encoding;
use std::path::PathBuf;
use vref_hash::HashStoreError;
use vref_model::{NodeRefError, ReferenceError};

/// Errors while encoding or decoding references
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Nothing to parse
    #[error("empty reference string")]
    Empty,

    /// First character is not an encoding token
    #[error("unknown encoding token: '{0}'")]
    UnknownEncoding(char),

    /// Input ended while more was expected
    #[error("{encoding} reference ended early: expected {expected}")]
    UnexpectedEnd {
        encoding: Encoding,
        expected: &'static str,
    },

    /// Input does not match the grammar at `position`
    ///
    /// Positions are byte offsets for plain references and token indexes
    /// for the token-separated encodings.
    #[error("{encoding} reference: expected {expected} at {position}, found '{found}'")]
    Unexpected {
        encoding: Encoding,
        position: usize,
        expected: &'static str,
        found: String,
    },

    /// Input continues after a complete reference
    #[error("{encoding} reference: trailing input at {position}")]
    TrailingInput { encoding: Encoding, position: usize },

    /// Malformed escape sequence
    #[error("{encoding} reference: bad escape sequence in '{text}'")]
    BadEscape { encoding: Encoding, text: String },

    /// Nested references deeper than allowed
    #[error("{encoding} reference nests deeper than {max_depth} levels")]
    DepthExceeded { encoding: Encoding, max_depth: usize },

    /// Encoding cannot be embedded in node ids
    #[error("{0} encoding is not url-native and cannot be embedded in a node id")]
    NotUrlNative(Encoding),

    /// Node id does not carry a reference
    #[error("node id does not carry a virtual reference: '{0}'")]
    NotAReference(String),

    /// Malformed node reference inside a reference
    #[error("node reference error: {0}")]
    NodeRef(#[from] NodeRefError),

    /// Unknown protocol or malformed reference structure
    #[error("reference error: {0}")]
    Reference(#[from] ReferenceError),

    /// Path hash lookup failed
    #[error("hash store error: {0}")]
    HashStore(#[from] HashStoreError),
}

impl CodecError {
    pub(crate) fn unexpected(
        encoding: Encoding,
        position: usize,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::Unexpected {
            encoding,
            position,
            expected,
            found: found.into(),
        }
    }

    pub(crate) fn bad_escape(encoding: Encoding, text: impl Into<String>) -> Self {
        Self::BadEscape {
            encoding,
            text: text.into(),
        }
    }
}

/// Errors while loading or applying codec configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid setting value
    #[error("invalid setting {setting}: {message}")]
    InvalidSetting {
        setting: &'static str,
        message: String,
    },

    /// Prefix registration failed
    #[error("hash prefix registration failed: {0}")]
    HashStore(#[from] HashStoreError),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
