//! Occupancy index over the placement grid.
//!
//! Tracks which nodes block which cells and which wires pass through which
//! cells. Nodes are hard obstacles for placement and routing; wires only make
//! a cell more expensive to route through.
//!
//! Each entity keeps its own registration state in a [`CellFootprint`], so
//! the index never has to search for "where was this entity last time".

use crate::node::Node;
use smallvec::SmallVec;
use std::collections::HashMap;
use tracing::trace;
use wiregrid_core::{GridCell, NodeId, Point, WireId};
use wiregrid_settings::RoutingSettings;

/// World/grid coordinate conversion for a fixed cell size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    cell_size: f64,
}

impl GridMetrics {
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell containing a world point. Coordinates are floored, never rounded.
    pub fn world_to_grid(&self, p: &Point) -> GridCell {
        GridCell::new(
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    /// World-space centre of a cell.
    pub fn grid_to_world(&self, cell: GridCell) -> Point {
        let s = self.cell_size;
        Point::new(
            cell.col as f64 * s + s / 2.0,
            cell.row as f64 * s + s / 2.0,
        )
    }

    /// Nearest grid line intersection.
    pub fn snap_round(&self, p: &Point) -> Point {
        let s = self.cell_size;
        Point::new((p.x / s).round() * s, (p.y / s).round() * s)
    }

    /// Centre of the containing cell.
    pub fn snap_to_center(&self, p: &Point) -> Point {
        self.grid_to_world(self.world_to_grid(p))
    }
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self::new(wiregrid_core::constants::DEFAULT_CELL_SIZE)
    }
}

/// Registration state owned by a node or wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellFootprint {
    anchor: Option<GridCell>,
    cells: Vec<GridCell>,
}

impl CellFootprint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base cell of the last node registration.
    pub fn anchor(&self) -> Option<GridCell> {
        self.anchor
    }

    /// Cells marked by the last registration.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Cell cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostModel {
    pub base: u32,
    pub adjacency_penalty: u32,
    pub crossing_penalty: u32,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::from(&RoutingSettings::default())
    }
}

impl From<&RoutingSettings> for CostModel {
    fn from(settings: &RoutingSettings) -> Self {
        Self {
            base: settings.base_cost,
            adjacency_penalty: settings.adjacency_penalty,
            crossing_penalty: settings.crossing_penalty,
        }
    }
}

/// Occupancy counts for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridStats {
    /// Cells covered by at least one node
    pub blocked_cells: usize,
    /// Cells crossed by at least one wire
    pub wire_cells: usize,
}

/// Cell-keyed occupancy of nodes and wires.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OccupancyGrid {
    metrics: GridMetrics,
    costs: CostModel,
    blocking: HashMap<GridCell, SmallVec<[NodeId; 2]>>,
    wires: HashMap<GridCell, SmallVec<[WireId; 4]>>,
}

impl OccupancyGrid {
    pub fn new(metrics: GridMetrics, costs: CostModel) -> Self {
        Self {
            metrics,
            costs,
            blocking: HashMap::new(),
            wires: HashMap::new(),
        }
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn costs(&self) -> &CostModel {
        &self.costs
    }

    /// Base cell and covered cells of a `cols` x `rows` span centred at `center`.
    ///
    /// Even spans centre on a cell boundary and odd spans on a cell midpoint;
    /// in both cases the span starts `span / 2` cells before the base cell.
    pub fn span_cells(&self, center: &Point, cols: u32, rows: u32) -> (GridCell, Vec<GridCell>) {
        let base = self.metrics.world_to_grid(center);
        let start_col = base.col - (cols / 2) as i32;
        let start_row = base.row - (rows / 2) as i32;
        let mut cells = Vec::with_capacity(cols as usize * rows as usize);
        for i in 0..cols as i32 {
            for j in 0..rows as i32 {
                cells.push(GridCell::new(start_col + i, start_row + j));
            }
        }
        (base, cells)
    }

    /// Marks every cell of the node's span as blocked by it.
    ///
    /// No-op while the node's base cell is unchanged since the last call.
    pub fn register_node(&mut self, node: &mut Node) {
        let (base, cells) =
            self.span_cells(&node.position, node.config.col_span, node.config.row_span);
        if node.footprint.anchor == Some(base) && !node.footprint.cells.is_empty() {
            return;
        }

        self.unregister_node(node);

        for cell in &cells {
            self.blocking.entry(*cell).or_default().push(node.id);
        }
        trace!("registered node {} at base cell {}", node.id, base);
        node.footprint.anchor = Some(base);
        node.footprint.cells = cells;
    }

    /// Clears every cell previously marked by the node.
    pub fn unregister_node(&mut self, node: &mut Node) {
        for cell in node.footprint.cells.drain(..) {
            if let Some(entry) = self.blocking.get_mut(&cell) {
                if let Some(pos) = entry.iter().position(|id| *id == node.id) {
                    entry.remove(pos);
                }
                if entry.is_empty() {
                    self.blocking.remove(&cell);
                }
            }
        }
        node.footprint.anchor = None;
    }

    /// Records the wire in the cell of every path point.
    ///
    /// Any previous registration of the same wire is removed first. Points are
    /// floored into cells as given, without snapping.
    pub fn register_wire_path(&mut self, id: WireId, footprint: &mut CellFootprint, points: &[Point]) {
        self.unregister_wire(id, footprint);

        for p in points {
            let cell = self.metrics.world_to_grid(p);
            let entry = self.wires.entry(cell).or_default();
            if !entry.contains(&id) {
                entry.push(id);
            }
            footprint.cells.push(cell);
        }
    }

    /// Removes the wire from every cell it registered. Idempotent.
    pub fn unregister_wire(&mut self, id: WireId, footprint: &mut CellFootprint) {
        for cell in footprint.cells.drain(..) {
            if let Some(entry) = self.wires.get_mut(&cell) {
                entry.retain(|w| *w != id);
                if entry.is_empty() {
                    self.wires.remove(&cell);
                }
            }
        }
    }

    /// True iff no node blocks the cell.
    pub fn is_walkable(&self, cell: GridCell) -> bool {
        self.blocking.get(&cell).is_none_or(|nodes| nodes.is_empty())
    }

    /// Routing cost of entering `cell`, or `None` when it is blocked.
    ///
    /// A cell shared only with `current`'s own previous path is not
    /// penalised; any other sharing is.
    pub fn cell_cost(&self, cell: GridCell, current: Option<WireId>) -> Option<u32> {
        if !self.is_walkable(cell) {
            return None;
        }

        let mut cost = self.costs.base;

        if cell.neighbours().iter().any(|n| !self.is_walkable(*n)) {
            cost += self.costs.adjacency_penalty;
        }

        if let Some(wires) = self.wires.get(&cell) {
            let only_self = wires.len() == 1 && current.is_some_and(|id| wires[0] == id);
            if !wires.is_empty() && !only_self {
                cost += self.costs.crossing_penalty;
            }
        }

        Some(cost)
    }

    /// Nodes blocking the cell.
    pub fn nodes_at(&self, cell: GridCell) -> &[NodeId] {
        self.blocking.get(&cell).map_or(&[], |v| v.as_slice())
    }

    /// Wires registered in the cell.
    pub fn wires_at(&self, cell: GridCell) -> &[WireId] {
        self.wires.get(&cell).map_or(&[], |v| v.as_slice())
    }

    pub fn stats(&self) -> GridStats {
        GridStats {
            blocked_cells: self.blocking.len(),
            wire_cells: self.wires.len(),
        }
    }

    /// Drops all registrations. Entity footprints are left untouched and
    /// must be reset by their owners.
    pub fn clear(&mut self) {
        self.blocking.clear();
        self.wires.clear();
    }
}
