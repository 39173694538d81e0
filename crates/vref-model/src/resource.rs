//! Resources addressed by references
//!
//! A [`Resource`] is either a classpath location (built-in templates and
//! processor scripts) or a repository location (a node or a path).

use crate::node_ref::NodeRef;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Location of content inside the repository
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RepositoryLocation {
    /// Addressed by node reference
    Node(NodeRef),

    /// Addressed by repository path
    Path(String),
}

impl RepositoryLocation {
    /// Node reference, if this location is node-addressed
    #[inline]
    #[must_use]
    pub fn as_node_ref(&self) -> Option<&NodeRef> {
        match self {
            Self::Node(node) => Some(node),
            Self::Path(_) => None,
        }
    }
}

impl Display for RepositoryLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => write!(f, "{node}"),
            Self::Path(path) => write!(f, "{path}"),
        }
    }
}

/// Resource addressed by a reference or a resource parameter
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Resource {
    /// Classpath location, e.g. `org/alfresco/repo/virtual/node/vanilla.js`
    Classpath(String),

    /// Repository location
    Repository(RepositoryLocation),
}

impl Resource {
    /// Classpath resource
    #[inline]
    #[must_use]
    pub fn classpath(path: impl Into<String>) -> Self {
        Self::Classpath(path.into())
    }

    /// Repository resource addressed by node
    #[inline]
    #[must_use]
    pub fn node(node: NodeRef) -> Self {
        Self::Repository(RepositoryLocation::Node(node))
    }

    /// Repository resource addressed by path
    #[inline]
    #[must_use]
    pub fn repository_path(path: impl Into<String>) -> Self {
        Self::Repository(RepositoryLocation::Path(path.into()))
    }

    /// Node reference, if this is a node-addressed repository resource
    #[inline]
    #[must_use]
    pub fn as_node_ref(&self) -> Option<&NodeRef> {
        match self {
            Self::Repository(location) => location.as_node_ref(),
            Self::Classpath(_) => None,
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classpath(path) => write!(f, "classpath:{path}"),
            Self::Repository(location) => write!(f, "repository:{location}"),
        }
    }
}
