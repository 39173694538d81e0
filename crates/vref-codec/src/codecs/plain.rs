//! Plain encoding
//!
//! Human-readable and not URL-native:
//!
//! ```text
//! encoded   := "p" ":" reference
//! reference := protocol-name ":" resource "(" [ param ( "," param )* ] ")"
//! resource  := "c:" text (classpath) | "p:" text (repository path)
//!            | "n:" text (node reference)
//! param     := "s:" text | "r:" resource | "f:" reference
//! ```
//!
//! Text escapes `% : ( ) ,` as `%XX`.

use crate::codecs::{Codec, ReferenceParser, ReferenceStringifier};
use crate::encoding::Encoding;
use crate::error::CodecError;
use crate::escape::{escape_plain, unescape_plain, PLAIN_RESERVED};
use vref_model::{Parameter, Protocol, Reference, RepositoryLocation, Resource};

const ENCODING: Encoding = Encoding::Plain;

/// Plain encoding parser and stringifier
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCodec;

impl PlainCodec {
    fn write_reference(reference: &Reference, out: &mut String) -> Result<(), CodecError> {
        out.push_str(reference.protocol().name());
        out.push(':');
        Self::write_resource(reference.resource(), out)?;
        out.push('(');
        for (i, parameter) in reference.parameters().iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            match parameter {
                Parameter::String(value) => {
                    out.push_str("s:");
                    out.push_str(&escape_plain(value));
                }
                Parameter::Resource(resource) => {
                    out.push_str("r:");
                    Self::write_resource(resource, out)?;
                }
                Parameter::Reference(nested) => {
                    out.push_str("f:");
                    Self::write_reference(nested, out)?;
                }
            }
        }
        out.push(')');
        Ok(())
    }

    fn write_resource(resource: &Resource, out: &mut String) -> Result<(), CodecError> {
        match resource {
            Resource::Classpath(path) => {
                out.push_str("c:");
                out.push_str(&escape_plain(path));
            }
            Resource::Repository(RepositoryLocation::Path(path)) => {
                out.push_str("p:");
                out.push_str(&escape_plain(path));
            }
            Resource::Repository(RepositoryLocation::Node(node)) => {
                node.validate()?;
                out.push_str("n:");
                out.push_str(&escape_plain(&node.to_string()));
            }
        }
        Ok(())
    }
}

/// Recursive-descent reader over the plain grammar
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    max_depth: usize,
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn found(&self) -> String {
        self.input[self.pos..].chars().take(12).collect()
    }

    fn expect(&mut self, literal: &'static str) -> Result<(), CodecError> {
        if self.input[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else if self.pos >= self.input.len() {
            Err(CodecError::UnexpectedEnd {
                encoding: ENCODING,
                expected: literal,
            })
        } else {
            Err(CodecError::unexpected(ENCODING, self.pos, literal, self.found()))
        }
    }

    /// Text up to the next delimiter, unescaped
    fn text(&mut self) -> Result<String, CodecError> {
        let rest = &self.input[self.pos..];
        let end = rest
            .find(|c: char| c != '%' && PLAIN_RESERVED.contains(&c))
            .unwrap_or(rest.len());
        self.pos += end;
        unescape_plain(&rest[..end])
    }

    /// Single tag character followed by `:`
    fn tag(&mut self, expected: &'static str) -> Result<char, CodecError> {
        let tag = self.peek().ok_or(CodecError::UnexpectedEnd {
            encoding: ENCODING,
            expected,
        })?;
        let start = self.pos;
        self.pos += tag.len_utf8();
        if self.peek() != Some(':') {
            self.pos = start;
            return Err(CodecError::unexpected(ENCODING, start, expected, self.found()));
        }
        self.pos += 1;
        Ok(tag)
    }

    fn reference(&mut self, depth: usize) -> Result<Reference, CodecError> {
        if depth > self.max_depth {
            return Err(CodecError::DepthExceeded {
                encoding: ENCODING,
                max_depth: self.max_depth,
            });
        }
        let start = self.pos;
        let name_len = self.input[start..].find(':').ok_or(CodecError::UnexpectedEnd {
            encoding: ENCODING,
            expected: "protocol name",
        })?;
        let protocol: Protocol = self.input[start..start + name_len].parse()?;
        self.pos += name_len + 1;

        let resource = self.resource()?;
        self.expect("(")?;
        let mut parameters = Vec::new();
        if self.peek() != Some(')') {
            loop {
                parameters.push(self.parameter(depth)?);
                if self.peek() == Some(',') {
                    self.pos += 1;
                } else {
                    break;
                }
            }
        }
        self.expect(")")?;
        Ok(Reference::new(protocol, resource, parameters))
    }

    fn resource(&mut self) -> Result<Resource, CodecError> {
        let start = self.pos;
        match self.tag("resource tag")? {
            'c' => Ok(Resource::Classpath(self.text()?)),
            'p' => Ok(Resource::repository_path(self.text()?)),
            'n' => Ok(Resource::node(self.text()?.parse()?)),
            other => Err(CodecError::unexpected(ENCODING, start, "resource tag", other)),
        }
    }

    fn parameter(&mut self, depth: usize) -> Result<Parameter, CodecError> {
        let start = self.pos;
        match self.tag("parameter tag")? {
            's' => Ok(Parameter::String(self.text()?)),
            'r' => Ok(Parameter::Resource(self.resource()?)),
            'f' => Ok(Parameter::reference(self.reference(depth + 1)?)),
            other => Err(CodecError::unexpected(ENCODING, start, "parameter tag", other)),
        }
    }
}

impl ReferenceParser for PlainCodec {
    fn parse_with_depth(&self, input: &str, max_depth: usize) -> Result<Reference, CodecError> {
        let mut scanner = Scanner {
            input,
            pos: 0,
            max_depth,
        };
        scanner.expect("p:")?;
        let reference = scanner.reference(1)?;
        if scanner.pos != input.len() {
            return Err(CodecError::TrailingInput {
                encoding: ENCODING,
                position: scanner.pos,
            });
        }
        Ok(reference)
    }
}

impl ReferenceStringifier for PlainCodec {
    fn stringify(&self, reference: &Reference) -> Result<String, CodecError> {
        let mut out = String::from("p:");
        Self::write_reference(reference, &mut out)?;
        Ok(out)
    }
}

impl Codec for PlainCodec {
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
            &"/1".parse::<TemplatePath>().unwrap(),
            RepositoryLocation::Node(NodeRef::in_spaces_store("abc")),
        )
    }

    #[test]
    fn stringify_virtual() {
        assert_eq!(
            PlainCodec.stringify(&folder()).unwrap(),
            "p:virtual:c:org/alfresco/t.json(r:n:workspace%3A//SpacesStore/abc,s:/1)"
        );
    }

    #[test]
    fn parse_virtual() {
        let parsed = PlainCodec
            .parse("p:virtual:c:org/alfresco/t.json(r:n:workspace%3A//SpacesStore/abc,s:/1)")
            .unwrap();
        assert_eq!(parsed, folder());
    }

    #[test]
    fn nested_reference() {
        let document = NodeProtocol::new_reference(NodeRef::in_spaces_store("doc"), folder());
        let encoded = PlainCodec.stringify(&document).unwrap();
        assert_eq!(
            encoded,
            "p:node:n:workspace%3A//SpacesStore/doc(f:virtual:c:org/alfresco/t.json(r:n:workspace%3A//SpacesStore/abc,s:/1))"
        );
        assert_eq!(PlainCodec.parse(&encoded).unwrap(), document);
    }

    #[test]
    fn empty_parameters_and_text() {
        let reference = Reference::new(
            Protocol::Virtual,
            Resource::repository_path(""),
            vec![Parameter::string("")],
        );
        let encoded = PlainCodec.stringify(&reference).unwrap();
        assert_eq!(encoded, "p:virtual:p:(s:)");
        assert_eq!(PlainCodec.parse(&encoded).unwrap(), reference);

        let bare = Reference::new(Protocol::Vanilla, Resource::classpath("x"), Vec::new());
        assert_eq!(PlainCodec.stringify(&bare).unwrap(), "p:vanilla:c:x()");
        assert_eq!(PlainCodec.parse("p:vanilla:c:x()").unwrap(), bare);
    }

    #[test]
    fn reserved_characters_in_text() {
        let reference = Reference::new(
            Protocol::Virtual,
            Resource::classpath("a(b),c:d%e"),
            vec![Parameter::string("x,y")],
        );
        let encoded = PlainCodec.stringify(&reference).unwrap();
        assert_eq!(encoded, "p:virtual:c:a%28b%29%2Cc%3Ad%25e(s:x%2Cy)");
        assert_eq!(PlainCodec.parse(&encoded).unwrap(), reference);
    }

    #[test]
    fn unknown_protocol() {
        assert!(matches!(
            PlainCodec.parse("p:folder:c:x()"),
            Err(CodecError::Reference(_))
        ));
    }

    #[test]
    fn unknown_tags() {
        assert!(matches!(
            PlainCodec.parse("p:virtual:x:a()"),
            Err(CodecError::Unexpected { expected: "resource tag", position: 10, .. })
        ));
        assert!(matches!(
            PlainCodec.parse("p:virtual:c:a(q:1)"),
            Err(CodecError::Unexpected { expected: "parameter tag", .. })
        ));
        assert!(matches!(
            PlainCodec.parse("p:virtual:c(s:1)"),
            Err(CodecError::Unexpected { expected: "resource tag", .. })
        ));
    }

    #[test]
    fn truncated_and_trailing() {
        assert!(matches!(
            PlainCodec.parse("p:virtual:c:a(s:1"),
            Err(CodecError::UnexpectedEnd { expected: ")", .. })
        ));
        assert!(matches!(
            PlainCodec.parse("p:virtual:c:a()x"),
            Err(CodecError::TrailingInput { position: 15, .. })
        ));
        assert!(matches!(
            PlainCodec.parse("0-virtual"),
            Err(CodecError::Unexpected { position: 0, .. })
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
            PlainCodec.stringify(&split_store),
            Err(CodecError::NodeRef(vref_model::NodeRefError::InvalidStore(_)))
        ));
        let nested_empty_id = NodeProtocol::new_reference(
            NodeRef::in_spaces_store("doc"),
            Reference::new(Protocol::Node, Resource::node(NodeRef::in_spaces_store("")), Vec::new()),
        );
        assert!(matches!(
            PlainCodec.stringify(&nested_empty_id),
            Err(CodecError::NodeRef(vref_model::NodeRefError::MissingId(_)))
        ));
    }

    #[test]
    fn depth_limit() {
        let document = NodeProtocol::new_reference(NodeRef::in_spaces_store("doc"), folder());
        let encoded = PlainCodec.stringify(&document).unwrap();
        assert!(matches!(
            PlainCodec.parse_with_depth(&encoded, 1),
            Err(CodecError::DepthExceeded { max_depth: 1, .. })
        ));
    }
}
