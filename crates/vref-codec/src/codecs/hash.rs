//! Hash encoding
//!
//! URL-native and compact. Path prefixes registered in a [`HashStore`] are
//! replaced by their code, and nodes in `workspace://SpacesStore` are written
//! as their bare id:
//!
//! ```text
//! encoded   := "3" "-" reference
//! reference := protocol "-" resource "-" count ( "-" param )*
//! protocol  := "v" (virtual) | "n" (node) | "a" (vanilla)
//! resource  := "c" hashed (classpath) | "p" hashed (repository path)
//!            | "w" text (id in workspace://SpacesStore) | "r" text (node reference)
//! hashed    := [ code ] "~" text
//! param     := "s" text | resource | "f" "-" reference
//! ```
//!
//! Each `resource` and `s` parameter is a single token.

use crate::codecs::tokens::{self, Tokens};
use crate::codecs::{Codec, ReferenceParser, ReferenceStringifier};
use crate::encoding::Encoding;
use crate::error::CodecError;
use crate::escape::{escape_url, unescape_url};
use vref_hash::{classpath_store, repository_store, HashCode, HashStore, HashedPath};
use vref_model::{NodeRef, Parameter, Protocol, Reference, RepositoryLocation, Resource, StoreRef};

const ENCODING: Encoding = Encoding::Hash;

const HASH_SEPARATOR: char = '~';
const CLASSPATH: char = 'c';
const REPOSITORY_PATH: char = 'p';
const SPACES_STORE_NODE: char = 'w';
const REPOSITORY_NODE: char = 'r';
const STRING_PARAM: char = 's';
const REFERENCE_PARAM: &str = "f";

fn protocol_letter(protocol: Protocol) -> &'static str {
    match protocol {
        Protocol::Virtual => "v",
        Protocol::Node => "n",
        Protocol::Vanilla => "a",
    }
}

/// Hash encoding parser and stringifier
///
/// Classpath resources hash against one store, repository paths against
/// another.
#[derive(Debug, Clone, Copy)]
pub struct HashCodec<'s> {
    classpath: &'s HashStore,
    repository: &'s HashStore,
}

impl HashCodec<'static> {
    /// Codec bound to the process-wide stores
    #[inline]
    #[must_use]
    pub fn global() -> Self {
        Self::with_stores(classpath_store(), repository_store())
    }
}

impl<'s> HashCodec<'s> {
    /// Codec bound to the given stores
    #[inline]
    #[must_use]
    pub fn with_stores(classpath: &'s HashStore, repository: &'s HashStore) -> Self {
        Self {
            classpath,
            repository,
        }
    }

    fn write_reference(&self, reference: &Reference, out: &mut Vec<String>) -> Result<(), CodecError> {
        out.push(protocol_letter(reference.protocol()).to_string());
        out.push(self.resource_token(reference.resource())?);
        out.push(reference.parameters().len().to_string());
        for parameter in reference.parameters() {
            match parameter {
                Parameter::String(value) => {
                    out.push(format!("{STRING_PARAM}{}", escape_url(value)));
                }
                Parameter::Resource(resource) => out.push(self.resource_token(resource)?),
                Parameter::Reference(nested) => {
                    out.push(REFERENCE_PARAM.to_string());
                    self.write_reference(nested, out)?;
                }
            }
        }
        Ok(())
    }

    fn resource_token(&self, resource: &Resource) -> Result<String, CodecError> {
        let token = match resource {
            Resource::Classpath(path) => hashed_token(CLASSPATH, &self.classpath.hash(path)),
            Resource::Repository(RepositoryLocation::Path(path)) => {
                hashed_token(REPOSITORY_PATH, &self.repository.hash(path))
            }
            Resource::Repository(RepositoryLocation::Node(node)) => {
                node.validate()?;
                if node.store().is_workspace_spaces_store() {
                    format!("{SPACES_STORE_NODE}{}", escape_url(node.id()))
                } else {
                    format!("{REPOSITORY_NODE}{}", escape_url(&node.to_string()))
                }
            }
        };
        Ok(token)
    }

    fn read_reference(
        &self,
        tokens: &mut Tokens<'_>,
        depth: usize,
        max_depth: usize,
    ) -> Result<Reference, CodecError> {
        if depth > max_depth {
            return Err(CodecError::DepthExceeded {
                encoding: ENCODING,
                max_depth,
            });
        }
        let letter = tokens.next("protocol letter")?;
        let protocol = Protocol::ALL
            .into_iter()
            .find(|p| protocol_letter(*p) == letter)
            .ok_or_else(|| tokens.unexpected("protocol letter", letter))?;
        let token = tokens.next("resource")?;
        let resource = self
            .read_resource(token)?
            .ok_or_else(|| tokens.unexpected("resource", token))?;
        let count = tokens.next_count()?;

        let mut parameters = Vec::with_capacity(count);
        for _ in 0..count {
            let token = tokens.next("parameter")?;
            if token == REFERENCE_PARAM {
                let nested = self.read_reference(tokens, depth + 1, max_depth)?;
                parameters.push(Parameter::reference(nested));
            } else if let Some(text) = token.strip_prefix(STRING_PARAM) {
                parameters.push(Parameter::String(unescape_url(ENCODING, text)?));
            } else {
                let resource = self
                    .read_resource(token)?
                    .ok_or_else(|| tokens.unexpected("parameter", token))?;
                parameters.push(Parameter::Resource(resource));
            }
        }
        Ok(Reference::new(protocol, resource, parameters))
    }

    /// Decode a resource token; `None` if the tag is not a resource tag
    fn read_resource(&self, token: &str) -> Result<Option<Resource>, CodecError> {
        let mut chars = token.chars();
        let Some(tag) = chars.next() else {
            return Ok(None);
        };
        let payload = chars.as_str();
        let resource = match tag {
            CLASSPATH => Resource::Classpath(unhash(self.classpath, payload)?),
            REPOSITORY_PATH => Resource::repository_path(unhash(self.repository, payload)?),
            SPACES_STORE_NODE => Resource::node(NodeRef::try_new(
                StoreRef::workspace_spaces_store(),
                unescape_url(ENCODING, payload)?,
            )?),
            REPOSITORY_NODE => Resource::node(unescape_url(ENCODING, payload)?.parse()?),
            _ => return Ok(None),
        };
        Ok(Some(resource))
    }
}

fn hashed_token(tag: char, hashed: &HashedPath) -> String {
    let code = hashed.code.as_ref().map_or("", HashCode::as_str);
    format!("{tag}{code}{HASH_SEPARATOR}{}", escape_url(&hashed.remainder))
}

fn unhash(store: &HashStore, payload: &str) -> Result<String, CodecError> {
    let (code, remainder) = payload
        .split_once(HASH_SEPARATOR)
        .ok_or_else(|| CodecError::unexpected(ENCODING, 0, "hashed path", payload))?;
    let code = if code.is_empty() {
        None
    } else {
        Some(code.parse::<HashCode>()?)
    };
    let hashed = HashedPath {
        code,
        remainder: unescape_url(ENCODING, remainder)?,
    };
    Ok(store.unhash(&hashed)?)
}

impl ReferenceParser for HashCodec<'_> {
    fn parse_with_depth(&self, input: &str, max_depth: usize) -> Result<Reference, CodecError> {
        let mut tokens = Tokens::open(ENCODING, input)?;
        let reference = self.read_reference(&mut tokens, 1, max_depth)?;
        tokens.finish()?;
        Ok(reference)
    }
}

impl ReferenceStringifier for HashCodec<'_> {
    fn stringify(&self, reference: &Reference) -> Result<String, CodecError> {
        let mut out = vec![ENCODING.token().to_string()];
        self.write_reference(reference, &mut out)?;
        Ok(tokens::join(&out))
    }
}

impl Codec for HashCodec<'_> {
    fn encoding(&self) -> Encoding {
        ENCODING
    }
}
