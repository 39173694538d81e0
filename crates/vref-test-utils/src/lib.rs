//! Testing utilities for the VREF workspace
//!
//! Shared fixtures, private hash stores, and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use uuid::Uuid;
use vref_hash::HashStore;
use vref_model::{
    NodeProtocol, NodeRef, Parameter, Protocol, Reference, RepositoryLocation, Resource, StoreRef,
    TemplatePath, VanillaProtocol, VirtualProtocol,
};

pub const SMART_FOLDER_TEMPLATE: &str = "org/alfresco/repo/virtual/node/smart.json";
pub const VANILLA_PROCESSOR: &str = "org/alfresco/repo/virtual/node/vanilla.js";

pub fn create_node_ref() -> NodeRef {
    NodeRef::in_spaces_store(Uuid::new_v4().to_string())
}

pub fn create_template_path(path: &str) -> TemplatePath {
    path.parse().unwrap()
}

pub fn create_virtual_reference(path: &str) -> Reference {
    create_virtual_reference_for(create_node_ref(), path)
}

pub fn create_virtual_reference_for(actual: NodeRef, path: &str) -> Reference {
    VirtualProtocol::new_reference(
        Resource::classpath(SMART_FOLDER_TEMPLATE),
        &create_template_path(path),
        RepositoryLocation::Node(actual),
    )
}

pub fn create_vanilla_reference(path: &str) -> Reference {
    VanillaProtocol::new_reference(
        VANILLA_PROCESSOR,
        &create_template_path(path),
        create_node_ref(),
        create_node_ref(),
    )
}

pub fn create_document_reference(parent: Reference) -> Reference {
    NodeProtocol::new_reference(create_node_ref(), parent)
}

/// Classpath and repository stores not shared with the process-wide ones
pub struct TestStores {
    pub classpath: HashStore,
    pub repository: HashStore,
}

impl TestStores {
    pub fn empty() -> Self {
        Self {
            classpath: HashStore::new("test-classpath"),
            repository: HashStore::new("test-repository"),
        }
    }

    /// Stores seeded the same way as the process-wide ones
    pub fn seeded() -> Self {
        let stores = Self::empty();
        for (prefix, code) in vref_hash::global::CLASSPATH_SEEDS {
            stores.classpath.put(prefix, code.parse().unwrap()).unwrap();
        }
        for (prefix, code) in vref_hash::global::REPOSITORY_SEEDS {
            stores.repository.put(prefix, code.parse().unwrap()).unwrap();
        }
        stores
    }
}

impl Default for TestStores {
    fn default() -> Self {
        Self::seeded()
    }
}

pub fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9./_-]{0,24}",
        "[ -~]{0,16}",
        any::<String>().prop_map(|s| s.chars().take(12).collect()),
    ]
}

pub fn arb_path() -> impl Strategy<Value = String> {
    prop_oneof![
        "(/[a-z]{1,3}:[a-z_]{1,10}){0,4}",
        "/app:company_home(/[a-z]{1,3}:[a-z_]{1,10}){0,3}",
        "/app:company_home/app:dictionary/app:smart_folders(/[a-z.]{1,10}){0,2}",
        arb_text(),
    ]
}

pub fn arb_classpath() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}(/[a-z]{1,6}){0,3}/[a-z]{1,8}\\.json",
        "org/alfresco/repo/virtual(/[a-z]{1,8}){0,2}/[a-z]{1,8}\\.(json|js)",
        arb_text(),
    ]
}

/// Node references whose display form parses back to them, including ids
/// and identifiers with `/`, `:` and `%`
pub fn arb_node_ref() -> impl Strategy<Value = NodeRef> {
    prop_oneof![
        "[a-f0-9-]{1,36}".prop_map(NodeRef::in_spaces_store),
        "[a-z0-9/:%._-]{1,24}".prop_map(NodeRef::in_spaces_store),
        ("[a-z:%]{1,8}", "[A-Za-z0-9:%.]{1,12}", "[a-zA-Z0-9/:%._-]{1,36}")
            .prop_map(|(protocol, identifier, id)| NodeRef::new(StoreRef::new(protocol, identifier), id)),
    ]
}

/// Node references built without validation: empty parts, `/` in store
/// identifiers and `://` in protocols all occur
pub fn arb_any_node_ref() -> impl Strategy<Value = NodeRef> {
    prop_oneof![
        arb_node_ref(),
        "[a-z/:%]{0,6}".prop_map(NodeRef::in_spaces_store),
        ("[a-z:/%]{0,6}", "[a-zA-Z:/%]{0,6}", "[a-z:/%]{0,8}")
            .prop_map(|(protocol, identifier, id)| NodeRef::new(StoreRef::new(protocol, identifier), id)),
        Just(NodeRef::new(StoreRef::new("avm", "a/b"), "c")),
        Just(NodeRef::in_spaces_store("")),
    ]
}

fn resource_from(nodes: BoxedStrategy<NodeRef>) -> BoxedStrategy<Resource> {
    prop_oneof![
        arb_classpath().prop_map(Resource::Classpath),
        arb_path().prop_map(Resource::repository_path),
        nodes.prop_map(Resource::node),
    ]
    .boxed()
}

pub fn arb_resource() -> impl Strategy<Value = Resource> {
    resource_from(arb_node_ref().boxed())
}

pub fn arb_protocol() -> impl Strategy<Value = Protocol> {
    prop_oneof![
        Just(Protocol::Virtual),
        Just(Protocol::Node),
        Just(Protocol::Vanilla),
    ]
}

fn reference_from(nodes: BoxedStrategy<NodeRef>) -> BoxedStrategy<Reference> {
    let resources = resource_from(nodes);
    let flat_parameter = prop_oneof![
        arb_text().prop_map(Parameter::String),
        resources.clone().prop_map(Parameter::Resource),
    ];
    let leaf = (arb_protocol(), resources.clone(), prop::collection::vec(flat_parameter, 0..4))
        .prop_map(|(protocol, resource, parameters)| Reference::new(protocol, resource, parameters));

    leaf.prop_recursive(3, 24, 3, move |inner| {
        let parameter = prop_oneof![
            arb_text().prop_map(Parameter::String),
            resources.clone().prop_map(Parameter::Resource),
            inner.prop_map(Parameter::reference),
        ];
        (arb_protocol(), resources.clone(), prop::collection::vec(parameter, 0..4))
            .prop_map(|(protocol, resource, parameters)| Reference::new(protocol, resource, parameters))
    })
    .boxed()
}

/// Arbitrary references, nested up to four levels, with writable nodes
pub fn arb_reference() -> impl Strategy<Value = Reference> {
    reference_from(arb_node_ref().boxed())
}

/// Arbitrary references whose nodes may not be writable
pub fn arb_any_reference() -> impl Strategy<Value = Reference> {
    reference_from(arb_any_node_ref().boxed())
}

/// Every node reference in `reference`, nested ones included
pub fn node_refs(reference: &Reference) -> Vec<&NodeRef> {
    let mut nodes: Vec<&NodeRef> = reference.resource().as_node_ref().into_iter().collect();
    for parameter in reference.parameters() {
        match parameter {
            Parameter::Resource(resource) => nodes.extend(resource.as_node_ref()),
            Parameter::Reference(nested) => nodes.extend(node_refs(nested)),
            Parameter::String(_) => {}
        }
    }
    nodes
}
