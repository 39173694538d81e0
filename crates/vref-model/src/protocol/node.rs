//! Node protocol
//!
//! A node reference surfaces an actual node inside a virtual folder.
//! The resource is the actual node, parameter `[0]` is the virtual parent.

use crate::node_ref::NodeRef;
use crate::parameter::Parameter;
use crate::protocol::Protocol;
use crate::reference::{Reference, ReferenceError};
use crate::resource::Resource;

/// Operations on node references
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeProtocol;

impl NodeProtocol {
    /// Index of the virtual parent parameter
    pub const PARENT_PARAM_INDEX: usize = 0;

    /// Create a node reference under `parent`
    #[must_use]
    pub fn new_reference(node: NodeRef, parent: Reference) -> Reference {
        Reference::new(
            Protocol::Node,
            Resource::node(node),
            vec![Parameter::reference(parent)],
        )
    }

    /// Actual node of a node reference
    ///
    /// # Errors
    /// Returns error if the reference is not a node reference or its
    /// resource is not node-addressed
    pub fn node_ref(reference: &Reference) -> Result<&NodeRef, ReferenceError> {
        reference.require_protocol(Protocol::Node)?;
        reference
            .resource()
            .as_node_ref()
            .ok_or_else(|| ReferenceError::NotNodeAddressed(reference.resource().to_string()))
    }

    /// Virtual folder containing a node reference
    ///
    /// # Errors
    /// Returns error if the reference is not a node reference or has no
    /// parent parameter
    pub fn virtual_parent(reference: &Reference) -> Result<&Reference, ReferenceError> {
        reference.require_protocol(Protocol::Node)?;
        reference.reference_parameter(Self::PARENT_PARAM_INDEX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{TemplatePath, VirtualProtocol};
    use crate::resource::RepositoryLocation;

    fn parent() -> Reference {
        VirtualProtocol::new_reference(
            Resource::classpath("t.json"),
            &TemplatePath::root(),
            RepositoryLocation::Node(NodeRef::in_spaces_store("folder")),
        )
    }

    #[test]
    fn node_reference_layout() {
        let node = NodeRef::in_spaces_store("doc");
        let reference = NodeProtocol::new_reference(node.clone(), parent());
        assert_eq!(NodeProtocol::node_ref(&reference).unwrap(), &node);
        assert_eq!(NodeProtocol::virtual_parent(&reference).unwrap(), &parent());
    }

    #[test]
    fn virtual_reference_is_rejected() {
        assert!(matches!(
            NodeProtocol::node_ref(&parent()),
            Err(ReferenceError::WrongProtocol {
                expected: Protocol::Node,
                actual: Protocol::Virtual
            })
        ));
    }

    #[test]
    fn path_addressed_resource_is_rejected() {
        let reference = Reference::new(
            Protocol::Node,
            Resource::repository_path("/app:company_home/doc"),
            vec![Parameter::reference(parent())],
        );
        assert!(matches!(
            NodeProtocol::node_ref(&reference),
            Err(ReferenceError::NotNodeAddressed(_))
        ));
    }
}
