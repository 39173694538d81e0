//! VREF Codec
//!
//! String encodings for virtual folder references.
//!
//! # Encodings
//!
//! | encoding | token | url-native | shape |
//! |----------|-------|------------|-------|
//! | plain    | `p`   | no         | `p:virtual:c:tpl.json(r:n:workspace%3A//SpacesStore/abc,s:/)` |
//! | zero     | `0`   | yes        | `0-0-4-tpl.json-2-8-6-workspace_3A_2F_2FSpacesStore_2Fabc-7-_2F` |
//! | hash     | `3`   | yes        | `3-v-c~tpl.json-2-wabc-s_2F` |
//!
//! The leading token identifies the encoding, so [`parse`] needs no hint.
//!
//! # Example
//!
//! ```rust
//! use vref_codec::{convert, parse, EncodeReference, Encoding};
//! use vref_model::{NodeRef, RepositoryLocation, Resource, TemplatePath, VirtualProtocol};
//!
//! let folder = VirtualProtocol::new_reference(
//!     Resource::classpath("org/alfresco/repo/virtual/node/smart.json"),
//!     &TemplatePath::root(),
//!     RepositoryLocation::Node(NodeRef::in_spaces_store("abc")),
//! );
//!
//! let hashed = folder.encode().unwrap();
//! assert_eq!(parse(&hashed).unwrap(), folder);
//!
//! let plain = convert(&hashed, Encoding::Plain).unwrap();
//! assert!(plain.starts_with("p:virtual:"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod codecs;
pub mod config;
pub mod encoding;
pub mod error;
pub mod node_id;

mod escape;

// Re-exports for convenience
pub use codecs::{
    Codec, CodecRegistry, HashCodec, PlainCodec, ReferenceParser, ReferenceStringifier, ZeroCodec,
    DEFAULT_MAX_DEPTH,
};
pub use config::{CodecConfig, PrefixEntry};
pub use encoding::Encoding;
pub use error::{CodecError, CodecResult, ConfigError};
pub use node_id::{from_node_ref, is_reference, looks_like_reference, to_node_ref};

use vref_model::Reference;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse an encoded reference, detecting its encoding
///
/// # Errors
/// Returns error if the string is not a well-formed reference
pub fn parse(input: &str) -> CodecResult<Reference> {
    CodecRegistry::global().parse(input)
}

/// Re-encode an encoded reference with another encoding
///
/// # Errors
/// Returns error if the input does not parse
pub fn convert(input: &str, to: Encoding) -> CodecResult<String> {
    CodecRegistry::global().convert(input, to)
}

/// Encoding methods on [`Reference`]
pub trait EncodeReference {
    /// Encode with [`Encoding::DEFAULT`]
    ///
    /// # Errors
    /// Returns error if encoding fails
    fn encode(&self) -> CodecResult<String> {
        self.encode_as(Encoding::DEFAULT)
    }

    /// Encode with `encoding`
    ///
    /// # Errors
    /// Returns error if encoding fails
    fn encode_as(&self, encoding: Encoding) -> CodecResult<String>;

    /// Encode with the configured default encoding
    ///
    /// # Errors
    /// Returns error if encoding fails
    fn encode_with(&self, config: &CodecConfig) -> CodecResult<String> {
        self.encode_as(config.default_encoding)
    }
}

impl EncodeReference for Reference {
    fn encode_as(&self, encoding: Encoding) -> CodecResult<String> {
        CodecRegistry::global().stringify(self, encoding)
    }
}

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for encoding and decoding references
    pub use crate::{
        convert, parse, CodecConfig, CodecError, CodecRegistry, EncodeReference, Encoding,
        ReferenceParser, ReferenceStringifier,
    };
    pub use vref_model::{
        NodeProtocol, NodeRef, Parameter, Protocol, Reference, RepositoryLocation, Resource,
        TemplatePath, VanillaProtocol, VirtualProtocol,
    };
}
