//! Reference parameters

use crate::reference::Reference;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};

/// Positional parameter of a [`Reference`]
///
/// Parameters nest: a [`Parameter::Reference`] carries a full reference,
/// which is how node references point back at their virtual parent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Parameter {
    /// Resource parameter (e.g. the actual node of a virtual folder)
    Resource(Resource),

    /// Free text parameter (e.g. a template path)
    String(String),

    /// Nested reference
    Reference(Box<Reference>),
}

impl Parameter {
    /// Free text parameter
    #[inline]
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Nested reference parameter
    #[inline]
    #[must_use]
    pub fn reference(reference: Reference) -> Self {
        Self::Reference(Box::new(reference))
    }

    /// Short kind name, used in error messages
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Resource(_) => "resource",
            Self::String(_) => "string",
            Self::Reference(_) => "reference",
        }
    }

    /// Resource, if this is a resource parameter
    #[inline]
    #[must_use]
    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    /// Text, if this is a string parameter
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Nested reference, if this is a reference parameter
    #[inline]
    #[must_use]
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }
}

impl From<Resource> for Parameter {
    fn from(resource: Resource) -> Self {
        Self::Resource(resource)
    }
}

impl From<Reference> for Parameter {
    fn from(reference: Reference) -> Self {
        Self::reference(reference)
    }
}
