//! Entity identifiers.
//!
//! Ids are allocated monotonically by the scene and never reused, so a stale
//! id simply fails to resolve.

use serde::{Deserialize, Serialize};

/// Identifier of a placed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Identifier of a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WireId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "N{}", self.0)
    }
}

impl std::fmt::Display for WireId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "W{}", self.0)
    }
}

/// Topmost entity under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hit {
    Node(NodeId),
    Wire(WireId),
}

impl Hit {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Hit::Node(id) => Some(*id),
            Hit::Wire(_) => None,
        }
    }

    pub fn wire(&self) -> Option<WireId> {
        match self {
            Hit::Wire(id) => Some(*id),
            Hit::Node(_) => None,
        }
    }
}
