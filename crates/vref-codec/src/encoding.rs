//! Reference string encodings
//!
//! Every encoded reference starts with its encoding's token character, so
//! any string can be routed to the right parser without outside context.

use crate::codecs::{HashCodec, PlainCodec, ReferenceParser, ReferenceStringifier, ZeroCodec};
use crate::error::CodecError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use vref_model::Reference;

static GLOBAL_HASH_CODEC: Lazy<HashCodec<'static>> = Lazy::new(HashCodec::global);

/// String encoding of a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Human-readable, not URL-native
    Plain,

    /// Numeric codes, URL-native
    Zero,

    /// Compact, path-hashed, URL-native
    Hash,
}

impl Encoding {
    /// All encodings, in declaration order
    pub const ALL: [Self; 3] = [Self::Plain, Self::Zero, Self::Hash];

    /// Encoding used when none is requested
    pub const DEFAULT: Self = Self::Hash;

    /// Leading token character
    #[inline]
    #[must_use]
    pub const fn token(self) -> char {
        match self {
            Self::Plain => 'p',
            Self::Zero => '0',
            Self::Hash => '3',
        }
    }

    /// Whether encoded strings only use URL-safe characters
    #[inline]
    #[must_use]
    pub const fn is_url_native(self) -> bool {
        match self {
            Self::Plain => false,
            Self::Zero | Self::Hash => true,
        }
    }

    /// Stable encoding name
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Zero => "zero",
            Self::Hash => "hash",
        }
    }

    /// Encoding for a token character
    #[must_use]
    pub fn from_token(token: char) -> Option<Self> {
        Self::ALL.into_iter().find(|encoding| encoding.token() == token)
    }

    /// Encoding of an encoded reference, from its first character
    ///
    /// # Errors
    /// Returns error if `input` is empty or starts with an unknown token
    pub fn detect(input: &str) -> Result<Self, CodecError> {
        let first = input.chars().next().ok_or(CodecError::Empty)?;
        Self::from_token(first).ok_or(CodecError::UnknownEncoding(first))
    }

    /// Built-in parser for this encoding
    ///
    /// The hash parser is bound to the process-wide hash stores.
    #[must_use]
    pub fn parser(self) -> &'static dyn ReferenceParser {
        match self {
            Self::Plain => &PlainCodec,
            Self::Zero => &ZeroCodec,
            Self::Hash => &*GLOBAL_HASH_CODEC,
        }
    }

    /// Built-in stringifier for this encoding
    #[must_use]
    pub fn stringifier(self) -> &'static dyn ReferenceStringifier {
        match self {
            Self::Plain => &PlainCodec,
            Self::Zero => &ZeroCodec,
            Self::Hash => &*GLOBAL_HASH_CODEC,
        }
    }

    /// Parse `input`, which must be in this encoding
    ///
    /// # Errors
    /// Returns error if `input` is malformed or in another encoding
    pub fn parse(self, input: &str) -> Result<Reference, CodecError> {
        self.parser().parse(input)
    }

    /// Encode `reference` in this encoding
    ///
    /// # Errors
    /// Returns error if the reference cannot be expressed in this encoding
    pub fn stringify(self, reference: &Reference) -> Result<String, CodecError> {
        self.stringifier().stringify(reference)
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = CodecError;

    /// Accepts a name (`plain`) or a token (`p`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if let Some(encoding) = Self::ALL.into_iter().find(|e| e.name() == lower) {
            return Ok(encoding);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(token), None) => Self::from_token(token).ok_or(CodecError::UnknownEncoding(token)),
            (None, _) => Err(CodecError::Empty),
            (Some(token), Some(_)) => Err(CodecError::UnknownEncoding(token)),
        }
    }
}
