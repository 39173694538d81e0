//! Reference parsers and stringifiers
//!
//! Each encoding has one codec implementing both directions:
//! - [`PlainCodec`]: readable, parenthesised grammar
//! - [`ZeroCodec`]: numeric codes, `-`-separated tokens
//! - [`HashCodec`]: letter codes, hashed path prefixes, compact node ids

use crate::encoding::Encoding;
use crate::error::CodecError;
use once_cell::sync::Lazy;
use std::sync::Arc;
use vref_model::Reference;

mod hash;
mod plain;
mod tokens;
mod zero;

pub use hash::HashCodec;
pub use plain::PlainCodec;
pub use zero::ZeroCodec;

/// Nesting depth accepted when no limit is configured
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Decodes encoded strings into references
pub trait ReferenceParser: Send + Sync {
    /// Parse `input`, rejecting references nested deeper than `max_depth`
    ///
    /// # Errors
    /// Returns error if `input` does not match the encoding's grammar
    fn parse_with_depth(&self, input: &str, max_depth: usize) -> Result<Reference, CodecError>;

    /// Parse `input` with [`DEFAULT_MAX_DEPTH`]
    ///
    /// # Errors
    /// Returns error if `input` does not match the encoding's grammar
    fn parse(&self, input: &str) -> Result<Reference, CodecError> {
        self.parse_with_depth(input, DEFAULT_MAX_DEPTH)
    }
}

/// Encodes references into strings
pub trait ReferenceStringifier: Send + Sync {
    /// Encode `reference`
    ///
    /// # Errors
    /// Returns error if the reference cannot be expressed in this encoding
    fn stringify(&self, reference: &Reference) -> Result<String, CodecError>;
}

/// Both directions of one encoding
pub trait Codec: ReferenceParser + ReferenceStringifier {
    /// Encoding this codec implements
    fn encoding(&self) -> Encoding;
}

/// Codec lookup by encoding
///
/// The default registry holds the three built-in codecs, with the hash
/// codec bound to the process-wide hash stores.
#[derive(Clone)]
pub struct CodecRegistry {
    codecs: Vec<Arc<dyn Codec>>,
}

static DEFAULT_REGISTRY: Lazy<CodecRegistry> = Lazy::new(CodecRegistry::with_defaults);

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field(
                "encodings",
                &self.codecs.iter().map(|c| c.encoding()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl CodecRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Registry with the built-in codecs
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PlainCodec);
        registry.register(ZeroCodec);
        registry.register(HashCodec::global());
        registry
    }

    /// Shared registry with the built-in codecs
    #[inline]
    #[must_use]
    pub fn global() -> &'static Self {
        &DEFAULT_REGISTRY
    }

    /// Register a codec, replacing any codec for the same encoding
    pub fn register<C: Codec + 'static>(&mut self, codec: C) {
        let encoding = codec.encoding();
        self.codecs.retain(|existing| existing.encoding() != encoding);
        self.codecs.push(Arc::new(codec));
    }

    /// Codec for `encoding`
    #[must_use]
    pub fn get(&self, encoding: Encoding) -> Option<&dyn Codec> {
        self.codecs
            .iter()
            .find(|codec| codec.encoding() == encoding)
            .map(|codec| &**codec)
    }

    /// Registered encodings
    #[must_use]
    pub fn encodings(&self) -> Vec<Encoding> {
        self.codecs.iter().map(|codec| codec.encoding()).collect()
    }

    fn require(&self, encoding: Encoding) -> Result<&dyn Codec, CodecError> {
        self.get(encoding)
            .ok_or(CodecError::UnknownEncoding(encoding.token()))
    }

    /// Parse `input`, detecting its encoding
    ///
    /// # Errors
    /// Returns error if the encoding is unknown or not registered, or the
    /// input is malformed
    pub fn parse_with_depth(&self, input: &str, max_depth: usize) -> Result<Reference, CodecError> {
        let encoding = Encoding::detect(input)?;
        tracing::trace!(%encoding, input, "parsing reference");
        self.require(encoding)?.parse_with_depth(input, max_depth)
    }

    /// Parse `input` with [`DEFAULT_MAX_DEPTH`]
    ///
    /// # Errors
    /// See [`CodecRegistry::parse_with_depth`]
    pub fn parse(&self, input: &str) -> Result<Reference, CodecError> {
        self.parse_with_depth(input, DEFAULT_MAX_DEPTH)
    }

    /// Encode `reference` with `encoding`
    ///
    /// # Errors
    /// Returns error if the encoding is not registered or cannot express
    /// the reference
    pub fn stringify(&self, reference: &Reference, encoding: Encoding) -> Result<String, CodecError> {
        self.require(encoding)?.stringify(reference)
    }

    /// Re-encode `input` with `to`
    ///
    /// # Errors
    /// Returns error if parsing or encoding fails
    pub fn convert(&self, input: &str, to: Encoding) -> Result<String, CodecError> {
        let reference = self.parse(input)?;
        let converted = self.stringify(&reference, to)?;
        tracing::debug!(from = input, to = %to, "converted reference");
        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_all_encodings() {
        let registry = CodecRegistry::with_defaults();
        assert_eq!(registry.encodings(), Encoding::ALL.to_vec());
    }

    #[test]
    fn register_replaces_same_encoding() {
        let mut registry = CodecRegistry::with_defaults();
        registry.register(ZeroCodec);
        assert_eq!(registry.encodings().len(), 3);
        assert_eq!(registry.encodings().last(), Some(&Encoding::Zero));
    }

    #[test]
    fn missing_codec_is_an_error() {
        let mut registry = CodecRegistry::new();
        registry.register(PlainCodec);
        assert!(matches!(
            registry.parse("0-0"),
            Err(CodecError::UnknownEncoding('0'))
        ));
    }
}
