//! Repository node addressing
//!
//! Provides [`StoreRef`] and [`NodeRef`], the `protocol://identifier/id`
//! addresses of actual repository nodes.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

const STORE_SEPARATOR: &str = "://";

/// Protocol of the default content store
pub const WORKSPACE_PROTOCOL: &str = "workspace";

/// Identifier of the default content store
pub const SPACES_STORE_ID: &str = "SpacesStore";

/// Reference to a content store
///
/// # Examples
/// - `workspace://SpacesStore`
/// - `archive://SpacesStore`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreRef {
    protocol: String,
    identifier: String,
}

impl StoreRef {
    /// Create new store reference
    #[inline]
    #[must_use]
    pub fn new(protocol: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            identifier: identifier.into(),
        }
    }

    /// Create a store reference that survives display and parse
    ///
    /// # Errors
    /// Returns [`NodeRefError::InvalidStore`] if the protocol is empty or
    /// contains `://`, or the identifier is empty or contains `/`
    pub fn try_new(
        protocol: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Result<Self, NodeRefError> {
        let store = Self::new(protocol, identifier);
        store.validate()?;
        Ok(store)
    }

    /// Check that [`Display`] output parses back to this store
    ///
    /// # Errors
    /// See [`StoreRef::try_new`]
    pub fn validate(&self) -> Result<(), NodeRefError> {
        let protocol_ok = !self.protocol.is_empty() && !self.protocol.contains(STORE_SEPARATOR);
        let identifier_ok = !self.identifier.is_empty() && !self.identifier.contains('/');
        if protocol_ok && identifier_ok {
            Ok(())
        } else {
            Err(NodeRefError::InvalidStore(self.to_string()))
        }
    }

    /// The `workspace://SpacesStore` store
    #[inline]
    #[must_use]
    pub fn workspace_spaces_store() -> Self {
        Self::new(WORKSPACE_PROTOCOL, SPACES_STORE_ID)
    }

    /// Store protocol (e.g. `workspace`)
    #[inline]
    #[must_use]
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Store identifier (e.g. `SpacesStore`)
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Check if this is the default `workspace://SpacesStore` store
    #[inline]
    #[must_use]
    pub fn is_workspace_spaces_store(&self) -> bool {
        self.protocol == WORKSPACE_PROTOCOL && self.identifier == SPACES_STORE_ID
    }
}

impl Display for StoreRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.protocol, STORE_SEPARATOR, self.identifier)
    }
}

impl FromStr for StoreRef {
    type Err = NodeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (protocol, identifier) = s
            .split_once(STORE_SEPARATOR)
            .ok_or_else(|| NodeRefError::MissingStoreSeparator(s.to_string()))?;
        Self::try_new(protocol, identifier).map_err(|_| NodeRefError::InvalidStore(s.to_string()))
    }
}

/// Reference to an actual repository node
///
/// Format: `protocol://identifier/id`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeRef {
    store: StoreRef,
    id: String,
}

impl NodeRef {
    /// Create new node reference
    #[inline]
    #[must_use]
    pub fn new(store: StoreRef, id: impl Into<String>) -> Self {
        Self {
            store,
            id: id.into(),
        }
    }

    /// Create a node reference that survives display and parse
    ///
    /// # Errors
    /// Returns error if the store is invalid or `id` is empty
    pub fn try_new(store: StoreRef, id: impl Into<String>) -> Result<Self, NodeRefError> {
        let node = Self::new(store, id);
        node.validate()?;
        Ok(node)
    }

    /// Check that [`Display`] output parses back to this node
    ///
    /// # Errors
    /// See [`NodeRef::try_new`]
    pub fn validate(&self) -> Result<(), NodeRefError> {
        self.store.validate()?;
        if self.id.is_empty() {
            return Err(NodeRefError::MissingId(self.to_string()));
        }
        Ok(())
    }

    /// Node in the `workspace://SpacesStore` store
    #[inline]
    #[must_use]
    pub fn in_spaces_store(id: impl Into<String>) -> Self {
        Self::new(StoreRef::workspace_spaces_store(), id)
    }

    /// Containing store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &StoreRef {
        &self.store
    }

    /// Node identifier within the store
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Display for NodeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.store, self.id)
    }
}

impl FromStr for NodeRef {
    type Err = NodeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (protocol, rest) = s
            .split_once(STORE_SEPARATOR)
            .ok_or_else(|| NodeRefError::MissingStoreSeparator(s.to_string()))?;
        let (identifier, id) = rest
            .split_once('/')
            .ok_or_else(|| NodeRefError::MissingId(s.to_string()))?;
        let store = StoreRef::try_new(protocol, identifier)
            .map_err(|_| NodeRefError::InvalidStore(s.to_string()))?;
        if id.is_empty() {
            return Err(NodeRefError::MissingId(s.to_string()));
        }
        Ok(Self::new(store, id))
    }
}

impl TryFrom<String> for NodeRef {
    type Error = NodeRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeRef> for String {
    fn from(node: NodeRef) -> Self {
        node.to_string()
    }
}

/// Errors when parsing store and node references
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeRefError {
    /// No `://` between protocol and identifier
    #[error("missing '://' in store reference: '{0}'")]
    MissingStoreSeparator(String),

    /// Empty protocol or identifier
    #[error("invalid store reference: '{0}'")]
    InvalidStore(String),

    /// No node id after the store
    #[error("missing node id in node reference: '{0}'")]
    MissingId(String),
}
