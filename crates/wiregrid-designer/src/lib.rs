//! # WireGrid Designer
//!
//! This crate provides the editing core of WireGrid: nodes with typed pins
//! placed on a uniform grid, connected by orthogonal wires that route
//! themselves around obstacles.
//!
//! ## Core Components
//!
//! ### Routing
//! - **Occupancy Index**: which nodes block and which wires cross each cell
//! - **Path Finder**: turn-penalised best-first search over the grid
//! - **Path Simplifier**: colinear point removal and diagonal touch-ups
//! - **Wires**: routing sessions from pin to pin through forced waypoints
//!
//! ### Interaction
//! - **Scene**: arena of nodes and wires, hit testing, bindings
//! - **Tools**: selection and wire creation behind a priority state machine
//! - **Editor**: scene plus tools behind a single pointer-event entry point
//!
//! ### Output
//! - **Render list**: resolved drawables in z-order, serialisable with serde
//! - **SVG renderer**: standalone document for headless inspection
//!
//! ## Architecture
//!
//! ```text
//! Editor
//!   ├── ToolManager (Selection, CreateWire)
//!   └── Scene
//!         ├── Nodes / Wires
//!         ├── OccupancyGrid + WireRouter
//!         └── SelectionBox
//! ```

pub mod editor;
pub mod grid;
pub mod node;
pub mod render;
pub mod router;
pub mod scene;
pub mod selection_box;
pub mod simplify;
pub mod svg_renderer;
pub mod tools;
pub mod wire;

pub use editor::Editor;
pub use grid::{CellFootprint, CostModel, GridMetrics, GridStats, OccupancyGrid};
pub use node::{Node, NodeConfig, NodeHit, NodeKind, NodeLayout, PinRole, PinSide, PinSpec};
pub use render::{DrawCommand, DrawList, PinDraw};
pub use router::{RouteHints, RouteResult, RouterConfig, WireRouter};
pub use scene::Scene;
pub use selection_box::SelectionBox;
pub use simplify::{dedup_consecutive, densify, fix_diagonal_segments, simplify_path};
pub use svg_renderer::render_svg;
pub use tools::{CreateWireTool, SelectionTool, Tool, ToolKind, ToolManager, ToolSignal};
pub use wire::{CapStyle, PinRef, RecalcOutcome, Wire, WireState};
