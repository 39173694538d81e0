//! VREF Model
//!
//! Strongly-typed virtual folder references.
//!
//! # Core Concepts
//!
//! - [`Reference`]: protocol + resource + ordered parameters
//! - [`Protocol`]: virtual, node or vanilla interpretation
//! - [`Resource`]: classpath or repository location
//! - [`Parameter`]: resource, string or nested reference
//! - [`NodeRef`]: `protocol://store/id` address of an actual node
//!
//! # Example
//!
//! ```rust
//! use vref_model::{GetActualNodeRef, NodeProtocol, NodeRef, RepositoryLocation, Resource,
//!     TemplatePath, VirtualProtocol};
//!
//! let folder = VirtualProtocol::new_reference(
//!     Resource::classpath("org/alfresco/repo/virtual/node/default.json"),
//!     &TemplatePath::root(),
//!     RepositoryLocation::Node(NodeRef::in_spaces_store("abc")),
//! );
//! let document = NodeProtocol::new_reference(NodeRef::in_spaces_store("doc"), folder);
//!
//! assert_eq!(document.execute(&GetActualNodeRef).unwrap().id(), "doc");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod node_ref;
mod parameter;
mod reference;
mod resource;

pub mod protocol;

// Re-exports
pub use node_ref::{NodeRef, NodeRefError, StoreRef, SPACES_STORE_ID, WORKSPACE_PROTOCOL};
pub use parameter::Parameter;
pub use protocol::{
    GetActualNodeRef, GetParentReference, GetTemplatePath, NodeProtocol, Protocol, ProtocolMethod,
    TemplatePath, VanillaProtocol, VirtualProtocol,
};
pub use reference::{Reference, ReferenceError};
pub use resource::{RepositoryLocation, Resource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
