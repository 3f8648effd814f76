//! Error handling for WireGrid
//!
//! Provides error types for the editing layers:
//! - Connection errors (invalid wire endpoints)
//! - Scene errors (unknown entities, blocked placement)
//!
//! Routing failures are deliberately absent: a failed search degrades to a
//! straight segment and is never surfaced as an error value.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::ids::{NodeId, WireId};

/// Rejected connection attempt.
///
/// Returned by the scene before any wire or pin state is mutated, so the
/// in-progress wire stays in its drawing state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// The wire would end on the node it started from
    #[error("Wire cannot end on its own start node {node}")]
    SameNode {
        /// The start node.
        node: NodeId,
    },

    /// The target pin already carries a wire endpoint
    #[error("Pin '{pin}' on node {node} is already connected")]
    PinOccupied {
        /// The target node.
        node: NodeId,
        /// The occupied pin name.
        pin: String,
    },

    /// The node has no pin with the requested name
    #[error("Node {node} has no pin named '{pin}'")]
    UnknownPin {
        /// The target node.
        node: NodeId,
        /// The requested pin name.
        pin: String,
    },

    /// Both pins have the same role while role enforcement is enabled
    #[error("Cannot connect pin '{from}' to pin '{to}': both are {role}")]
    RoleMismatch {
        /// The start pin name.
        from: String,
        /// The target pin name.
        to: String,
        /// The shared role, for display.
        role: String,
    },

    /// The wire is not waiting for an end pin
    #[error("Wire {wire} is not being drawn")]
    NotDrawing {
        /// The wire.
        wire: WireId,
    },
}

/// Scene bookkeeping error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Node id is not in the scene
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    /// Wire id is not in the scene
    #[error("Wire {0} not found")]
    WireNotFound(WireId),

    /// Node footprint overlaps cells blocked by another node
    #[error("Cannot place node at ({x}, {y}): cell ({col}, {row}) is occupied")]
    PlacementBlocked {
        /// Snapped centre X.
        x: f64,
        /// Snapped centre Y.
        y: f64,
        /// First blocked column.
        col: i32,
        /// First blocked row.
        row: i32,
    },
}

/// Main error type for WireGrid
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Connection error
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Scene error
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a rejected connection
    pub fn is_connect_error(&self) -> bool {
        matches!(self, Error::Connect(_))
    }

    /// Check if this is a scene error
    pub fn is_scene_error(&self) -> bool {
        matches!(self, Error::Scene(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
