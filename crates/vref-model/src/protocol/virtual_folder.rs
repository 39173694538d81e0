//! Virtual folder protocol
//!
//! A virtual reference applies a template resource to an actual node.
//! Parameters:
//! - `[0]`: repository location of the actual node
//! - `[1]`: template path, the position of the folder inside the template

use crate::node_ref::NodeRef;
use crate::parameter::Parameter;
use crate::protocol::Protocol;
use crate::reference::{Reference, ReferenceError};
use crate::resource::{RepositoryLocation, Resource};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

const PATH_SEPARATOR: char = '/';

/// Position of a virtual folder inside its template
///
/// `/`-rooted sequence of template node ids. The root is `/`.
///
/// # Examples
/// - `/` → the template root
/// - `/1/3` → child `3` of child `1`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplatePath(Vec<String>);

impl TemplatePath {
    /// Template root (`/`)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Check if this is the template root
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Template node ids from root to leaf
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Append a child id, returning new path
    ///
    /// # Errors
    /// Returns error if `id` is empty or contains `/`
    pub fn child(&self, id: &str) -> Result<Self, ReferenceError> {
        if id.is_empty() || id.contains(PATH_SEPARATOR) {
            return Err(ReferenceError::InvalidTemplatePath(format!("{self}{id}")));
        }
        let mut segments = self.0.clone();
        segments.push(id.to_string());
        Ok(Self(segments))
    }

    /// Parent path (if not root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Last template node id (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

impl Display for TemplatePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for TemplatePath {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(rest) = s.strip_prefix(PATH_SEPARATOR) else {
            return Err(ReferenceError::InvalidTemplatePath(s.to_string()));
        };
        if rest.is_empty() {
            return Ok(Self::root());
        }
        let segments: Vec<String> = rest
            .split(PATH_SEPARATOR)
            .map(|seg| {
                if seg.is_empty() {
                    Err(ReferenceError::InvalidTemplatePath(s.to_string()))
                } else {
                    Ok(seg.to_string())
                }
            })
            .collect::<Result<_, _>>()?;
        Ok(Self(segments))
    }
}

impl TryFrom<String> for TemplatePath {
    type Error = ReferenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TemplatePath> for String {
    fn from(path: TemplatePath) -> Self {
        path.to_string()
    }
}

impl Default for TemplatePath {
    fn default() -> Self {
        Self::root()
    }
}

/// Operations on virtual (and vanilla) references
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualProtocol;

impl VirtualProtocol {
    /// Index of the actual node location parameter
    pub const ACTUAL_NODE_LOCATION_PARAM_INDEX: usize = 0;

    /// Index of the template path parameter
    pub const TEMPLATE_PATH_PARAM_INDEX: usize = 1;

    /// Create a virtual reference
    #[must_use]
    pub fn new_reference(
        template: Resource,
        template_path: &TemplatePath,
        actual: RepositoryLocation,
    ) -> Reference {
        Reference::new(
            Protocol::Virtual,
            template,
            vec![
                Parameter::Resource(Resource::Repository(actual)),
                Parameter::string(template_path.to_string()),
            ],
        )
    }

    /// Template path of a virtual folder reference
    ///
    /// # Errors
    /// Returns error if the reference is not a virtual folder or the
    /// parameter is missing or malformed
    pub fn template_path(reference: &Reference) -> Result<TemplatePath, ReferenceError> {
        require_virtual_folder(reference)?;
        reference
            .string_parameter(Self::TEMPLATE_PATH_PARAM_INDEX)?
            .parse()
    }

    /// Repository location of the actual node behind a virtual folder
    ///
    /// # Errors
    /// Returns error if the reference is not a virtual folder or the
    /// parameter is not a repository resource
    pub fn actual_node_location(reference: &Reference) -> Result<&RepositoryLocation, ReferenceError> {
        require_virtual_folder(reference)?;
        match reference.resource_parameter(Self::ACTUAL_NODE_LOCATION_PARAM_INDEX)? {
            Resource::Repository(location) => Ok(location),
            other @ Resource::Classpath(_) => Err(ReferenceError::NotNodeAddressed(other.to_string())),
        }
    }

    /// Actual node behind a virtual folder
    ///
    /// # Errors
    /// Returns error if the actual node is addressed by path
    pub fn actual_node_ref(reference: &Reference) -> Result<&NodeRef, ReferenceError> {
        let location = Self::actual_node_location(reference)?;
        location
            .as_node_ref()
            .ok_or_else(|| ReferenceError::NotNodeAddressed(location.to_string()))
    }

    /// Copy of a virtual folder reference pointing at another template path
    ///
    /// # Errors
    /// Returns error if the reference is not a virtual folder
    pub fn replace_template_path(
        reference: &Reference,
        template_path: &TemplatePath,
    ) -> Result<Reference, ReferenceError> {
        require_virtual_folder(reference)?;
        reference.with_parameter(
            Self::TEMPLATE_PATH_PARAM_INDEX,
            Parameter::string(template_path.to_string()),
        )
    }

    /// Reference to template child `id` of a virtual folder
    ///
    /// # Errors
    /// Returns error if the reference is not a virtual folder or `id` is
    /// not a valid template node id
    pub fn child_reference(reference: &Reference, id: &str) -> Result<Reference, ReferenceError> {
        let path = Self::template_path(reference)?.child(id)?;
        Self::replace_template_path(reference, &path)
    }

    /// Reference to the enclosing virtual folder
    ///
    /// Returns `None` at the template root, whose parent is the actual node.
    ///
    /// # Errors
    /// Returns error if the reference is not a virtual folder
    pub fn parent_reference(reference: &Reference) -> Result<Option<Reference>, ReferenceError> {
        match Self::template_path(reference)?.parent() {
            Some(parent) => Self::replace_template_path(reference, &parent).map(Some),
            None => Ok(None),
        }
    }
}

fn require_virtual_folder(reference: &Reference) -> Result<(), ReferenceError> {
    if reference.protocol().is_virtual_folder() {
        Ok(())
    } else {
        Err(ReferenceError::WrongProtocol {
            expected: Protocol::Virtual,
            actual: reference.protocol(),
        })
    }
}
