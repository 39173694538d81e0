//! Protocol-dispatched operations
//!
//! A [`ProtocolMethod`] provides one hook per protocol; callers run it with
//! [`Reference::execute`] instead of matching on the protocol themselves.

use crate::node_ref::NodeRef;
use crate::protocol::{NodeProtocol, Protocol, TemplatePath, VirtualProtocol};
use crate::reference::{Reference, ReferenceError};

/// Operation with per-protocol behaviour
///
/// Hooks default to [`ReferenceError::Unsupported`]; vanilla references
/// fall back to the virtual hook.
pub trait ProtocolMethod {
    /// Result of the operation
    type Output;

    /// Operation name, used in error messages
    const NAME: &'static str;

    /// Run on a virtual reference
    fn for_virtual(&self, reference: &Reference) -> Result<Self::Output, ReferenceError> {
        let _ = reference;
        Err(unsupported::<Self>(Protocol::Virtual))
    }

    /// Run on a node reference
    fn for_node(&self, reference: &Reference) -> Result<Self::Output, ReferenceError> {
        let _ = reference;
        Err(unsupported::<Self>(Protocol::Node))
    }

    /// Run on a vanilla reference
    fn for_vanilla(&self, reference: &Reference) -> Result<Self::Output, ReferenceError> {
        self.for_virtual(reference)
    }
}

fn unsupported<M: ProtocolMethod + ?Sized>(protocol: Protocol) -> ReferenceError {
    ReferenceError::Unsupported {
        operation: M::NAME,
        protocol,
    }
}

/// Resolve the actual node a reference stands for
///
/// Virtual folders resolve to the node the template is applied to; node
/// references resolve to their own node.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetActualNodeRef;

impl ProtocolMethod for GetActualNodeRef {
    type Output = NodeRef;

    const NAME: &'static str = "get-actual-node-ref";

    fn for_virtual(&self, reference: &Reference) -> Result<NodeRef, ReferenceError> {
        VirtualProtocol::actual_node_ref(reference).cloned()
    }

    fn for_node(&self, reference: &Reference) -> Result<NodeRef, ReferenceError> {
        NodeProtocol::node_ref(reference).cloned()
    }
}

/// Resolve the enclosing virtual folder
///
/// `None` means the parent is not virtual (a template root's parent is
/// its actual node).
#[derive(Debug, Clone, Copy, Default)]
pub struct GetParentReference;

impl ProtocolMethod for GetParentReference {
    type Output = Option<Reference>;

    const NAME: &'static str = "get-parent-reference";

    fn for_virtual(&self, reference: &Reference) -> Result<Option<Reference>, ReferenceError> {
        VirtualProtocol::parent_reference(reference)
    }

    fn for_node(&self, reference: &Reference) -> Result<Option<Reference>, ReferenceError> {
        NodeProtocol::virtual_parent(reference).map(|parent| Some(parent.clone()))
    }
}

/// Resolve the template path of a virtual folder
#[derive(Debug, Clone, Copy, Default)]
pub struct GetTemplatePath;

impl ProtocolMethod for GetTemplatePath {
    type Output = TemplatePath;

    const NAME: &'static str = "get-template-path";

    fn for_virtual(&self, reference: &Reference) -> Result<TemplatePath, ReferenceError> {
        VirtualProtocol::template_path(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::VanillaProtocol;
    use crate::resource::{RepositoryLocation, Resource};

    fn folder() -> Reference {
        VirtualProtocol::new_reference(
            Resource::classpath("t.json"),
            &"/1".parse().unwrap(),
            RepositoryLocation::Node(NodeRef::in_spaces_store("folder")),
        )
    }

    fn document() -> Reference {
        NodeProtocol::new_reference(NodeRef::in_spaces_store("doc"), folder())
    }

    #[test]
    fn actual_node_ref_per_protocol() {
        assert_eq!(folder().execute(&GetActualNodeRef).unwrap().id(), "folder");
        assert_eq!(document().execute(&GetActualNodeRef).unwrap().id(), "doc");

        let vanilla = VanillaProtocol::new_reference(
            "vanilla.js",
            &TemplatePath::root(),
            NodeRef::in_spaces_store("vfolder"),
            NodeRef::in_spaces_store("json"),
        );
        assert_eq!(vanilla.execute(&GetActualNodeRef).unwrap().id(), "vfolder");
    }

    #[test]
    fn parent_reference_per_protocol() {
        let parent = folder().execute(&GetParentReference).unwrap().unwrap();
        assert_eq!(VirtualProtocol::template_path(&parent).unwrap(), TemplatePath::root());
        assert!(parent.execute(&GetParentReference).unwrap().is_none());
        assert_eq!(document().execute(&GetParentReference).unwrap(), Some(folder()));
    }

    #[test]
    fn template_path_unsupported_for_nodes() {
        assert_eq!(
            document().execute(&GetTemplatePath).unwrap_err(),
            ReferenceError::Unsupported {
                operation: "get-template-path",
                protocol: Protocol::Node,
            }
        );
    }
}
