//! Reference protocols
//!
//! A [`Protocol`] decides how a reference's resource and parameters are
//! interpreted:
//!
//! - **virtual**: a virtual folder produced by applying a template to an
//!   actual node
//! - **node**: an actual node surfaced inside a virtual folder
//! - **vanilla**: a virtual folder whose template is driven by a processor
//!   script and a repository-held vanilla template

mod method;
mod node;
mod vanilla;
mod virtual_folder;

pub use method::{GetActualNodeRef, GetParentReference, GetTemplatePath, ProtocolMethod};
pub use node::NodeProtocol;
pub use vanilla::VanillaProtocol;
pub use virtual_folder::{TemplatePath, VirtualProtocol};

use crate::reference::ReferenceError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Reference protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// Virtual folder (template applied to an actual node)
    Virtual,

    /// Actual node inside a virtual folder
    Node,

    /// Virtual folder driven by a vanilla template
    Vanilla,
}

impl Protocol {
    /// All protocols, in declaration order
    pub const ALL: [Self; 3] = [Self::Virtual, Self::Node, Self::Vanilla];

    /// Stable protocol name
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Virtual => "virtual",
            Self::Node => "node",
            Self::Vanilla => "vanilla",
        }
    }

    /// Whether references of this protocol denote virtual folders
    #[inline]
    #[must_use]
    pub const fn is_virtual_folder(self) -> bool {
        matches!(self, Self::Virtual | Self::Vanilla)
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Protocol {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|protocol| protocol.name() == s)
            .ok_or_else(|| ReferenceError::UnknownProtocol(s.to_string()))
    }
}
