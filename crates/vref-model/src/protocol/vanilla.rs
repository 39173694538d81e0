//! Vanilla protocol
//!
//! A vanilla reference is a virtual folder whose resource is the processor
//! script that interprets a repository-held vanilla template.
//! Parameters:
//! - `[0]`, `[1]`: as for virtual references
//! - `[2]`: the vanilla template node

use crate::node_ref::NodeRef;
use crate::parameter::Parameter;
use crate::protocol::{Protocol, TemplatePath, VirtualProtocol};
use crate::reference::{Reference, ReferenceError};
use crate::resource::{RepositoryLocation, Resource};

/// Operations on vanilla references
///
/// Template path and actual node accessors are shared with
/// [`VirtualProtocol`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VanillaProtocol;

impl VanillaProtocol {
    /// Index of the vanilla template parameter
    pub const VANILLA_TEMPLATE_PARAM_INDEX: usize = 2;

    /// Create a vanilla reference
    #[must_use]
    pub fn new_reference(
        processor_classpath: impl Into<String>,
        template_path: &TemplatePath,
        actual: NodeRef,
        vanilla_template: NodeRef,
    ) -> Reference {
        Reference::new(
            Protocol::Vanilla,
            Resource::classpath(processor_classpath),
            vec![
                Parameter::Resource(Resource::Repository(RepositoryLocation::Node(actual))),
                Parameter::string(template_path.to_string()),
                Parameter::Resource(Resource::node(vanilla_template)),
            ],
        )
    }

    /// Vanilla template node of a vanilla reference
    ///
    /// # Errors
    /// Returns error if the reference is not a vanilla reference or the
    /// template parameter is not node-addressed
    pub fn vanilla_template_node(reference: &Reference) -> Result<&NodeRef, ReferenceError> {
        reference.require_protocol(Protocol::Vanilla)?;
        let resource = reference.resource_parameter(Self::VANILLA_TEMPLATE_PARAM_INDEX)?;
        resource
            .as_node_ref()
            .ok_or_else(|| ReferenceError::NotNodeAddressed(resource.to_string()))
    }

    /// Template path of a vanilla reference
    ///
    /// # Errors
    /// See [`VirtualProtocol::template_path`]
    pub fn template_path(reference: &Reference) -> Result<TemplatePath, ReferenceError> {
        reference.require_protocol(Protocol::Vanilla)?;
        VirtualProtocol::template_path(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanilla_reference_layout() {
        let actual = NodeRef::in_spaces_store("folder");
        let template = NodeRef::in_spaces_store("template-json");
        let reference = VanillaProtocol::new_reference(
            "org/alfresco/repo/virtual/node/vanilla.js",
            &"/2".parse().unwrap(),
            actual.clone(),
            template.clone(),
        );

        assert_eq!(reference.protocol(), Protocol::Vanilla);
        assert_eq!(VanillaProtocol::vanilla_template_node(&reference).unwrap(), &template);
        assert_eq!(VanillaProtocol::template_path(&reference).unwrap().to_string(), "/2");
        assert_eq!(VirtualProtocol::actual_node_ref(&reference).unwrap(), &actual);
    }

    #[test]
    fn child_keeps_vanilla_template() {
        let reference = VanillaProtocol::new_reference(
            "vanilla.js",
            &TemplatePath::root(),
            NodeRef::in_spaces_store("folder"),
            NodeRef::in_spaces_store("template-json"),
        );
        let child = VirtualProtocol::child_reference(&reference, "7").unwrap();
        assert_eq!(child.protocol(), Protocol::Vanilla);
        assert_eq!(
            VanillaProtocol::vanilla_template_node(&child).unwrap().id(),
            "template-json"
        );
    }

    #[test]
    fn plain_virtual_reference_is_rejected() {
        let reference = VirtualProtocol::new_reference(
            Resource::classpath("t.json"),
            &TemplatePath::root(),
            RepositoryLocation::Node(NodeRef::in_spaces_store("folder")),
        );
        assert!(VanillaProtocol::vanilla_template_node(&reference).is_err());
    }
}
