//! # WireGrid Core
//!
//! Core types and utilities for WireGrid.
//! Provides the geometry primitives shared by the occupancy grid and the
//! router, entity identifiers, the pointer-event model consumed by the
//! interaction tools, and the error types used across the workspace.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod input;

pub use error::{ConnectError, Error, Result, SceneError};
pub use geometry::{Bounds, Direction, GridCell, Point};
pub use ids::{Hit, NodeId, WireId};
pub use input::{MouseButton, PointerEvent, PointerEventKind, PointerTracker};
