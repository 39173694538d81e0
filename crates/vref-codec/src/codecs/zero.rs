//! Zero encoding
//!
//! URL-native, numeric codes, `-`-separated tokens:
//!
//! ```text
//! encoded   := "0" "-" reference
//! reference := protocol "-" resource "-" count ( "-" param )*
//! protocol  := "0" (virtual) | "1" (node) | "2" (vanilla)
//! resource  := "4" "-" text (classpath) | "5" "-" text (repository path)
//!            | "6" "-" text (node reference)
//! param     := "7" "-" text | "8" "-" resource | "9" "-" reference
//! ```

use crate::codecs::tokens::{self, Tokens};
use crate::codecs::{Codec, ReferenceParser, ReferenceStringifier};
use crate::encoding::Encoding;
use crate::error::CodecError;
use crate::escape::{escape_url, unescape_url};
use vref_model::{Parameter, Protocol, Reference, RepositoryLocation, Resource};

const ENCODING: Encoding = Encoding::Zero;

const CLASSPATH: &str = "4";
const REPOSITORY_PATH: &str = "5";
const REPOSITORY_NODE: &str = "6";
const STRING_PARAM: &str = "7";
const RESOURCE_PARAM: &str = "8";
const REFERENCE_PARAM: &str = "9";

fn protocol_code(protocol: Protocol) -> &'static str {
    match protocol {
        Protocol::Virtual => "0",
        Protocol::Node => "1",
        Protocol::Vanilla => "2",
    }
}

/// Zero encoding parser and stringifier
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroCodec;

impl ZeroCodec {
    fn write_reference(reference: &Reference, out: &mut Vec<String>) -> Result<(), CodecError> {
        out.push(protocol_code(reference.protocol()).to_string());
        Self::write_resource(reference.resource(), out)?;
        out.push(reference.parameters().len().to_string());
        for parameter in reference.parameters() {
            match parameter {
                Parameter::String(value) => {
                    out.push(STRING_PARAM.to_string());
                    out.push(escape_url(value));
                }
                Parameter::Resource(resource) => {
                    out.push(RESOURCE_PARAM.to_string());
                    Self::write_resource(resource, out)?;
                }
                Parameter::Reference(nested) => {
                    out.push(REFERENCE_PARAM.to_string());
                    Self::write_reference(nested, out)?;
                }
            }
        }
        Ok(())
    }

    fn write_resource(resource: &Resource, out: &mut Vec<String>) -> Result<(), CodecError> {
        let (code, text) = match resource {
            Resource::Classpath(path) => (CLASSPATH, escape_url(path)),
            Resource::Repository(RepositoryLocation::Path(path)) => (REPOSITORY_PATH, escape_url(path)),
            Resource::Repository(RepositoryLocation::Node(node)) => {
                node.validate()?;
                (REPOSITORY_NODE, escape_url(&node.to_string()))
            }
        };
        out.push(code.to_string());
        out.push(text);
        Ok(())
    }

    fn read_reference(
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
        let code = tokens.next("protocol code")?;
        let protocol = Protocol::ALL
            .into_iter()
            .find(|p| protocol_code(*p) == code)
            .ok_or_else(|| tokens.unexpected("protocol code", code))?;
        let resource = Self::read_resource(tokens)?;
        let count = tokens.next_count()?;

        let mut parameters = Vec::with_capacity(count);
        for _ in 0..count {
            let kind = tokens.next("parameter code")?;
            let parameter = match kind {
                STRING_PARAM => Parameter::String(Self::read_text(tokens)?),
                RESOURCE_PARAM => Parameter::Resource(Self::read_resource(tokens)?),
                REFERENCE_PARAM => {
                    Parameter::reference(Self::read_reference(tokens, depth + 1, max_depth)?)
                }
                other => return Err(tokens.unexpected("parameter code", other)),
            };
            parameters.push(parameter);
        }
        Ok(Reference::new(protocol, resource, parameters))
    }

    fn read_resource(tokens: &mut Tokens<'_>) -> Result<Resource, CodecError> {
        let code = tokens.next("resource code")?;
        match code {
            CLASSPATH => Ok(Resource::Classpath(Self::read_text(tokens)?)),
            REPOSITORY_PATH => Ok(Resource::repository_path(Self::read_text(tokens)?)),
            REPOSITORY_NODE => Ok(Resource::node(Self::read_text(tokens)?.parse()?)),
            other => Err(tokens.unexpected("resource code", other)),
        }
    }

    fn read_text(tokens: &mut Tokens<'_>) -> Result<String, CodecError> {
        unescape_url(ENCODING, tokens.next("text")?)
    }
}

impl ReferenceParser for ZeroCodec {
    fn parse_with_depth(&self, input: &str, max_depth: usize) -> Result<Reference, CodecError> {
        let mut tokens = Tokens::open(ENCODING, input)?;
        let reference = Self::read_reference(&mut tokens, 1, max_depth)?;
        tokens.finish()?;
        Ok(reference)
    }
}

impl ReferenceStringifier for ZeroCodec {
    fn stringify(&self, reference: &Reference) -> Result<String, CodecError> {
        let mut out = vec![ENCODING.token().to_string()];
        Self::write_reference(reference, &mut out)?;
        Ok(tokens::join(&out))
    }
}

impl Codec for ZeroCodec {
    fn encoding(&self) -> Encoding {
        ENCODING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vref_model::{NodeProtocol, NodeRef, TemplatePath, VirtualProtocol};

    fn folder() -> Reference {
        VirtualProtocol::new_reference(
            Resource::classpath("org/alfresco/t.json"),
            &TemplatePath::root(),
            RepositoryLocation::Node(NodeRef::in_spaces_store("abc")),
        )
    }

    #[test]
    fn stringify_virtual() {
        assert_eq!(
            ZeroCodec.stringify(&folder()).unwrap(),
            "0-0-4-org_2Falfresco_2Ft.json-2-8-6-workspace_3A_2F_2FSpacesStore_2Fabc-7-_2F"
        );
    }

    #[test]
    fn parse_virtual() {
        let parsed = ZeroCodec
            .parse("0-0-4-org_2Falfresco_2Ft.json-2-8-6-workspace_3A_2F_2FSpacesStore_2Fabc-7-_2F")
            .unwrap();
        assert_eq!(parsed, folder());
    }

    #[test]
    fn nested_roundtrip() {
        let document = NodeProtocol::new_reference(NodeRef::in_spaces_store("doc"), folder());
        let encoded = ZeroCodec.stringify(&document).unwrap();
        assert!(encoded.starts_with("0-1-6-"));
        assert_eq!(ZeroCodec.parse(&encoded).unwrap(), document);
    }

    #[test]
    fn empty_text_and_no_parameters() {
        let reference = Reference::new(Protocol::Vanilla, Resource::classpath(""), Vec::new());
        let encoded = ZeroCodec.stringify(&reference).unwrap();
        assert_eq!(encoded, "0-2-4--0");
        assert_eq!(ZeroCodec.parse(&encoded).unwrap(), reference);
    }

    #[test]
    fn unknown_codes() {
        assert!(matches!(
            ZeroCodec.parse("0-5-4-a-0"),
            Err(CodecError::Unexpected { expected: "protocol code", position: 1, .. })
        ));
        assert!(matches!(
            ZeroCodec.parse("0-0-3-a-0"),
            Err(CodecError::Unexpected { expected: "resource code", position: 2, .. })
        ));
        assert!(matches!(
            ZeroCodec.parse("0-0-4-a-1-1-x"),
            Err(CodecError::Unexpected { expected: "parameter code", .. })
        ));
    }

    #[test]
    fn truncated_and_trailing() {
        assert!(matches!(
            ZeroCodec.parse("0-0-4"),
            Err(CodecError::UnexpectedEnd { expected: "text", .. })
        ));
        assert!(matches!(
            ZeroCodec.parse("0-0-4-a-0-7"),
            Err(CodecError::TrailingInput { position: 5, .. })
        ));
    }

    #[test]
    fn bad_node_ref() {
        assert!(matches!(
            ZeroCodec.parse("0-1-6-nonsense-0"),
            Err(CodecError::NodeRef(_))
        ));
    }

    #[test]
    fn unwritable_node_refs_are_rejected() {
        let split_store = Reference::new(
            Protocol::Node,
            Resource::node(NodeRef::new(vref_model::StoreRef::new("avm", "a/b"), "c")),
            Vec::new(),
        );
        assert!(matches!(
            ZeroCodec.stringify(&split_store),
            Err(CodecError::NodeRef(vref_model::NodeRefError::InvalidStore(_)))
        ));
        let empty_id = Reference::new(
            Protocol::Virtual,
            Resource::classpath("t.json"),
            vec![Parameter::Resource(Resource::node(NodeRef::in_spaces_store("")))],
        );
        assert!(matches!(
            ZeroCodec.stringify(&empty_id),
            Err(CodecError::NodeRef(vref_model::NodeRefError::MissingId(_)))
        ));
    }

    #[test]
    fn depth_limit() {
        let document = NodeProtocol::new_reference(NodeRef::in_spaces_store("doc"), folder());
        let encoded = ZeroCodec.stringify(&document).unwrap();
        assert!(ZeroCodec.parse_with_depth(&encoded, 2).is_ok());
        assert!(matches!(
            ZeroCodec.parse_with_depth(&encoded, 1),
            Err(CodecError::DepthExceeded { max_depth: 1, .. })
        ));
    }
}
