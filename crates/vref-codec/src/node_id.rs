//! Embedding references in node ids
//!
//! A virtual node is addressed like any other node: `store/id`, where the id
//! is a URL-native encoded reference. Ordinary ids (UUIDs) never start with
//! an encoding token followed by `-`, so the two cannot be confused.

use crate::codecs::CodecRegistry;
use crate::config::CodecConfig;
use crate::encoding::Encoding;
use crate::error::CodecError;
use vref_model::{NodeRef, Reference, StoreRef};

/// Wrap `reference` in a node reference in `store`, using the configured
/// default encoding
///
/// # Errors
/// Returns error if the configured encoding is not URL-native or encoding
/// fails
pub fn to_node_ref(
    reference: &Reference,
    store: &StoreRef,
    config: &CodecConfig,
) -> Result<NodeRef, CodecError> {
    let encoding = config.default_encoding;
    if !encoding.is_url_native() {
        return Err(CodecError::NotUrlNative(encoding));
    }
    let id = CodecRegistry::global().stringify(reference, encoding)?;
    Ok(NodeRef::new(store.clone(), id))
}

/// Whether `id` has the shape of an embedded reference
#[must_use]
pub fn looks_like_reference(id: &str) -> bool {
    let mut chars = id.chars();
    let encoding = chars.next().and_then(Encoding::from_token);
    matches!(encoding, Some(e) if e.is_url_native()) && chars.next() == Some('-')
}

/// Reference carried by `node`'s id, nested no deeper than
/// `config.max_depth`
///
/// # Errors
/// Returns [`CodecError::NotAReference`] for ordinary ids, or the parse
/// error for malformed or too deeply nested embedded references
pub fn from_node_ref(node: &NodeRef, config: &CodecConfig) -> Result<Reference, CodecError> {
    if !looks_like_reference(node.id()) {
        return Err(CodecError::NotAReference(node.id().to_string()));
    }
    CodecRegistry::global().parse_with_depth(node.id(), config.max_depth)
}

/// Whether `node` is a virtual node under `config`
#[must_use]
pub fn is_reference(node: &NodeRef, config: &CodecConfig) -> bool {
    match from_node_ref(node, config) {
        Ok(_) => true,
        Err(CodecError::NotAReference(_)) => false,
        Err(e) => {
            tracing::debug!(node = %node, error = %e, "node id looks like a reference but does not parse");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vref_model::{RepositoryLocation, Resource, TemplatePath, VirtualProtocol};

    fn folder() -> Reference {
        VirtualProtocol::new_reference(
            Resource::classpath("org/alfresco/repo/virtual/node/smart.json"),
            &TemplatePath::root(),
            RepositoryLocation::Node(NodeRef::in_spaces_store("a1")),
        )
    }

    #[test]
    fn embed_and_recover() {
        for encoding in [Encoding::Zero, Encoding::Hash] {
            let config = CodecConfig::new().with_default_encoding(encoding);
            let node = to_node_ref(&folder(), &StoreRef::workspace_spaces_store(), &config).unwrap();
            assert!(node.store().is_workspace_spaces_store());
            assert!(is_reference(&node, &config));
            assert_eq!(from_node_ref(&node, &config).unwrap(), folder());
        }
    }

    #[test]
    fn embedded_node_ref_survives_display_and_parse() {
        let node =
            to_node_ref(&folder(), &StoreRef::workspace_spaces_store(), &CodecConfig::new()).unwrap();
        assert!(node.id().starts_with("3-v-"));
        let reparsed: NodeRef = node.to_string().parse().unwrap();
        assert_eq!(from_node_ref(&reparsed, &CodecConfig::new()).unwrap(), folder());
    }

    #[test]
    fn plain_cannot_be_embedded() {
        assert!(matches!(
            to_node_ref(
                &folder(),
                &StoreRef::workspace_spaces_store(),
                &CodecConfig::new().with_default_encoding(Encoding::Plain)
            ),
            Err(CodecError::NotUrlNative(Encoding::Plain))
        ));
    }

    #[test]
    fn ordinary_ids_are_not_references() {
        for id in ["3f2a9c1e-1b2c-4d5e-8f90-a1b2c3d4e5f6", "0a1b2c3d", "p-x", ""] {
            let node = NodeRef::in_spaces_store(id);
            assert!(!is_reference(&node, &CodecConfig::new()), "{id}");
        }
        assert!(matches!(
            from_node_ref(&NodeRef::in_spaces_store("3f2a"), &CodecConfig::new()),
            Err(CodecError::NotAReference(_))
        ));
    }

    #[test]
    fn malformed_embedded_reference() {
        let node = NodeRef::in_spaces_store("3-v-garbage");
        assert!(looks_like_reference(node.id()));
        assert!(!is_reference(&node, &CodecConfig::new()));
        assert!(from_node_ref(&node, &CodecConfig::new()).is_err());
    }

    #[test]
    fn configured_depth_limits_embedded_references() {
        let mut reference = folder();
        for id in ["d1", "d2", "d3"] {
            reference = vref_model::NodeProtocol::new_reference(NodeRef::in_spaces_store(id), reference);
        }
        assert_eq!(reference.depth(), 4);

        let node =
            to_node_ref(&reference, &StoreRef::workspace_spaces_store(), &CodecConfig::new()).unwrap();
        let shallow = CodecConfig::new().with_max_depth(2);
        assert!(matches!(
            from_node_ref(&node, &shallow),
            Err(CodecError::DepthExceeded { max_depth: 2, .. })
        ));
        assert!(!is_reference(&node, &shallow));

        let exact = CodecConfig::new().with_max_depth(4);
        assert_eq!(from_node_ref(&node, &exact).unwrap(), reference);
        assert!(is_reference(&node, &exact));
    }
}
