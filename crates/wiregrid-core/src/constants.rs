//! Default values shared by the settings layer and the designer.
//!
//! These are the factory defaults; the running editor reads the effective
//! values from `wiregrid_settings::Config`.

/// Side length of one grid cell in world units.
pub const DEFAULT_CELL_SIZE: f64 = 50.0;

/// Cost of entering any walkable cell.
pub const BASE_CELL_COST: u32 = 10;

/// Extra cost for a cell with at least one blocked orthogonal neighbour.
pub const ADJACENCY_PENALTY: u32 = 5;

/// Extra cost for a cell already crossed by another wire.
pub const CROSSING_PENALTY: u32 = 50;

/// Extra cost for changing direction during a search.
pub const TURN_PENALTY: u32 = 20;

/// Maximum number of open-set expansions per search.
pub const MAX_ROUTE_ITERATIONS: usize = 6000;

/// Inflation applied to the Manhattan heuristic to break ties.
pub const HEURISTIC_WEIGHT: f64 = 1.001;

/// Stroke width of a rendered wire; half of it is the wire hit radius.
pub const WIRE_STROKE_WIDTH: f64 = 15.0;

/// Priority of the wire-creation tool.
pub const CREATE_WIRE_PRIORITY: i32 = 5;

/// Priority of the selection tool.
pub const SELECTION_PRIORITY: i32 = 0;
