//! The reference value object
//!
//! Provides [`Reference`], a protocol-tagged pointer to a resource plus an
//! ordered list of parameters. References are immutable values: every
//! "modification" returns a new reference.

use crate::parameter::Parameter;
use crate::protocol::{Protocol, ProtocolMethod};
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Structured virtual reference
///
/// # Structure
/// - `protocol`: how the reference is interpreted (virtual, node, vanilla)
/// - `resource`: the template, processor script or actual node
/// - `parameters`: protocol-specific positional parameters
///
/// # Example
/// ```
/// use vref_model::{NodeRef, Parameter, Protocol, Reference, Resource};
///
/// let reference = Reference::new(
///     Protocol::Virtual,
///     Resource::classpath("org/alfresco/repo/virtual/node/default.json"),
///     vec![
///         Parameter::Resource(Resource::node(NodeRef::in_spaces_store("abc"))),
///         Parameter::string("/"),
///     ],
/// );
/// assert_eq!(reference.parameters().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Reference {
    protocol: Protocol,
    resource: Resource,
    #[serde(default)]
    parameters: Vec<Parameter>,
}

impl Reference {
    /// Create new reference
    #[inline]
    #[must_use]
    pub fn new(protocol: Protocol, resource: Resource, parameters: Vec<Parameter>) -> Self {
        Self {
            protocol,
            resource,
            parameters,
        }
    }

    /// Reference protocol
    #[inline]
    #[must_use]
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Referenced resource
    #[inline]
    #[must_use]
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// All parameters in order
    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Parameter at `index`
    ///
    /// # Errors
    /// Returns error if there is no parameter at `index`
    pub fn parameter(&self, index: usize) -> Result<&Parameter, ReferenceError> {
        self.parameters
            .get(index)
            .ok_or(ReferenceError::MissingParameter {
                protocol: self.protocol,
                index,
            })
    }

    /// String parameter at `index`
    ///
    /// # Errors
    /// Returns error if the parameter is missing or not a string
    pub fn string_parameter(&self, index: usize) -> Result<&str, ReferenceError> {
        let parameter = self.parameter(index)?;
        parameter
            .as_str()
            .ok_or_else(|| self.mismatch(index, "string", parameter))
    }

    /// Resource parameter at `index`
    ///
    /// # Errors
    /// Returns error if the parameter is missing or not a resource
    pub fn resource_parameter(&self, index: usize) -> Result<&Resource, ReferenceError> {
        let parameter = self.parameter(index)?;
        parameter
            .as_resource()
            .ok_or_else(|| self.mismatch(index, "resource", parameter))
    }

    /// Nested reference parameter at `index`
    ///
    /// # Errors
    /// Returns error if the parameter is missing or not a reference
    pub fn reference_parameter(&self, index: usize) -> Result<&Reference, ReferenceError> {
        let parameter = self.parameter(index)?;
        parameter
            .as_reference()
            .ok_or_else(|| self.mismatch(index, "reference", parameter))
    }

    /// Copy of this reference with parameter `index` replaced
    ///
    /// # Errors
    /// Returns error if there is no parameter at `index`
    pub fn with_parameter(&self, index: usize, parameter: Parameter) -> Result<Self, ReferenceError> {
        self.parameter(index)?;
        let mut parameters = self.parameters.clone();
        parameters[index] = parameter;
        Ok(Self::new(self.protocol, self.resource.clone(), parameters))
    }

    /// Nesting depth: 1 for a reference without reference parameters
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .parameters
            .iter()
            .filter_map(Parameter::as_reference)
            .map(Reference::depth)
            .max()
            .unwrap_or(0)
    }

    /// Check that this reference uses `expected`
    ///
    /// # Errors
    /// Returns [`ReferenceError::WrongProtocol`] on mismatch
    pub fn require_protocol(&self, expected: Protocol) -> Result<(), ReferenceError> {
        if self.protocol == expected {
            Ok(())
        } else {
            Err(ReferenceError::WrongProtocol {
                expected,
                actual: self.protocol,
            })
        }
    }

    /// Dispatch a protocol method on this reference
    ///
    /// # Errors
    /// Propagates the method's error
    pub fn execute<M: ProtocolMethod>(&self, method: &M) -> Result<M::Output, ReferenceError> {
        match self.protocol {
            Protocol::Virtual => method.for_virtual(self),
            Protocol::Node => method.for_node(self),
            Protocol::Vanilla => method.for_vanilla(self),
        }
    }

    fn mismatch(&self, index: usize, expected: &'static str, actual: &Parameter) -> ReferenceError {
        ReferenceError::ParameterMismatch {
            protocol: self.protocol,
            index,
            expected,
            actual: actual.kind(),
        }
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}](", self.protocol, self.resource)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match parameter {
                Parameter::Resource(resource) => write!(f, "{resource}")?,
                Parameter::String(value) => write!(f, "{value:?}")?,
                Parameter::Reference(reference) => write!(f, "{reference}")?,
            }
        }
        f.write_str(")")
    }
}

/// Errors from reference inspection and protocol operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    /// Operation does not apply to this protocol
    #[error("wrong protocol: expected {expected}, got {actual}")]
    WrongProtocol { expected: Protocol, actual: Protocol },

    /// Operation not supported by this protocol
    #[error("operation '{operation}' not supported by protocol {protocol}")]
    Unsupported {
        operation: &'static str,
        protocol: Protocol,
    },

    /// Parameter index out of range
    #[error("{protocol} reference has no parameter at index {index}")]
    MissingParameter { protocol: Protocol, index: usize },

    /// Parameter has an unexpected kind
    #[error("{protocol} reference parameter {index}: expected {expected}, got {actual}")]
    ParameterMismatch {
        protocol: Protocol,
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    /// Resource is not addressed by node reference
    #[error("resource is not node-addressed: {0}")]
    NotNodeAddressed(String),

    /// Unknown protocol name
    #[error("unknown protocol: '{0}'")]
    UnknownProtocol(String),

    /// Malformed template path
    #[error("invalid template path: '{0}'")]
    InvalidTemplatePath(String),
}
