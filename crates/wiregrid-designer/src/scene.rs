//! Scene Management
//!
//! Owns every node and wire together with the occupancy index and the
//! router. All mutation goes through the scene so that pin bindings, grid
//! registrations and wire geometry stay consistent.
//!
//! Entities are kept in id order, which is also their z-order: later
//! entities draw on top and win hit tests.

use crate::grid::{CostModel, OccupancyGrid};
use crate::node::{Node, NodeConfig, NodeHit, NodeLayout, PinRole};
use crate::router::{RouteHints, RouterConfig, WireRouter};
use crate::selection_box::SelectionBox;
use crate::wire::{PinRef, RecalcOutcome, Wire};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use wiregrid_core::{Bounds, ConnectError, Hit, NodeId, Point, Result, SceneError, WireId};
use wiregrid_settings::Config;

pub struct Scene {
    layout: NodeLayout,
    grid: OccupancyGrid,
    router: WireRouter,
    nodes: BTreeMap<NodeId, Node>,
    wires: BTreeMap<WireId, Wire>,
    selection_box: SelectionBox,
    next_id: u64,
    enforce_pin_roles: bool,
    dirty: bool,
}

impl Scene {
    pub fn new(config: &Config) -> Self {
        let layout = NodeLayout::from_config(config);
        let grid = OccupancyGrid::new(layout.metrics, CostModel::from(&config.routing));
        Self {
            layout,
            grid,
            router: WireRouter::new(RouterConfig::from(&config.routing)),
            nodes: BTreeMap::new(),
            wires: BTreeMap::new(),
            selection_box: SelectionBox::new(),
            next_id: 1,
            enforce_pin_roles: config.routing.enforce_pin_roles,
            dirty: false,
        }
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn layout(&self) -> &NodeLayout {
        &self.layout
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn router(&self) -> &WireRouter {
        &self.router
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(&id)
    }

    /// Nodes in z-order.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.nodes.values()
    }

    /// Wires in z-order.
    pub fn wires(&self) -> impl DoubleEndedIterator<Item = &Wire> {
        self.wires.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    pub fn enforce_pin_roles(&self) -> bool {
        self.enforce_pin_roles
    }

    pub fn set_enforce_pin_roles(&mut self, enforce: bool) {
        self.enforce_pin_roles = enforce;
    }

    pub fn selection_box(&self) -> &SelectionBox {
        &self.selection_box
    }

    pub fn selection_box_mut(&mut self) -> &mut SelectionBox {
        self.dirty = true;
        &mut self.selection_box
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns the dirty flag and clears it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    // ---- nodes ----

    /// Places a node on the grid, centred on the snapped `position`.
    ///
    /// Fails without side effects when any cell of the footprint is already
    /// blocked by another node.
    pub fn add_node(&mut self, config: NodeConfig, position: Point) -> Result<NodeId> {
        let center = Node::snapped_center(&config, &position, &self.layout.metrics);
        let (_, cells) = self
            .grid
            .span_cells(&center, config.col_span, config.row_span);

        if let Some(cell) = cells.iter().find(|c| !self.grid.is_walkable(**c)) {
            warn!(
                "rejected placement of {} at ({}, {}): cell {} occupied",
                config.name, center.x, center.y, cell
            );
            return Err(SceneError::PlacementBlocked {
                x: center.x,
                y: center.y,
                col: cell.col,
                row: cell.row,
            }
            .into());
        }

        let id = NodeId(self.alloc_id());
        let mut node = Node::new(id, config, center);
        self.grid.register_node(&mut node);
        info!(
            "added node {} ({}) at ({}, {})",
            id, node.config.name, center.x, center.y
        );
        self.nodes.insert(id, node);
        self.dirty = true;
        Ok(id)
    }

    /// Deletes the node after deleting every wire that touches it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<()> {
        if !self.nodes.contains_key(&id) {
            return Err(SceneError::NodeNotFound(id).into());
        }

        let attached: Vec<WireId> = self
            .wires
            .values()
            .filter(|w| w.touches(id))
            .map(|w| w.id())
            .collect();
        for wire in attached {
            self.delete_wire(wire)?;
        }

        if let Some(mut node) = self.nodes.remove(&id) {
            self.grid.unregister_node(&mut node);
        }
        info!("removed node {}", id);
        self.dirty = true;
        Ok(())
    }

    /// Moves the node body only. Grid registration and attached wires are
    /// brought up to date by [`Scene::snap_node`] and the wire operations.
    pub fn translate_node(&mut self, id: NodeId, dx: f64, dy: f64) -> Result<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(SceneError::NodeNotFound(id))?;
        node.translate(dx, dy);
        self.dirty = true;
        Ok(())
    }

    /// Snaps the node to the grid, re-registers it and re-anchors the
    /// endpoints of its wires. Overlap with other nodes is not checked.
    pub fn snap_node(&mut self, id: NodeId) -> Result<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(SceneError::NodeNotFound(id))?;
        let center = Node::snapped_center(&node.config, &node.position, &self.layout.metrics);
        node.set_position(center);
        self.grid.register_node(node);
        let wires = node.connected_wires();

        for wire in wires {
            self.sync_wire_endpoints(wire)?;
        }
        self.dirty = true;
        Ok(())
    }

    pub fn node_hit(&self, id: NodeId, point: &Point) -> Option<NodeHit> {
        self.nodes.get(&id)?.hit_test(point, &self.layout)
    }

    /// Nodes reached through wires leaving this node's output pins.
    pub fn next_nodes(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for (pin, wire_id) in node.bindings() {
            if node.pin(pin).map(|s| s.role) != Some(PinRole::Output) {
                continue;
            }
            let Some(wire) = self.wires.get(&wire_id) else {
                continue;
            };
            let other = match wire.nodes() {
                (Some(a), Some(b)) if a == id => Some(b),
                (Some(a), Some(b)) if b == id => Some(a),
                _ => None,
            };
            if let Some(other) = other {
                if !out.contains(&other) {
                    out.push(other);
                }
            }
        }
        out
    }

    /// Wires bound to any of the node's pins.
    pub fn connected_wires(&self, id: NodeId) -> Vec<WireId> {
        self.nodes
            .get(&id)
            .map(|n| n.connected_wires())
            .unwrap_or_default()
    }

    // ---- wires ----

    fn pin_point(&self, pin: &PinRef) -> Option<Point> {
        self.nodes
            .get(&pin.node)?
            .pin_position(&pin.pin, &self.layout)
    }

    /// Starts a wire at a free pin. The pin is bound immediately.
    pub fn begin_wire(&mut self, node_id: NodeId, pin: &str) -> Result<WireId> {
        let node = self
            .nodes
            .get(&node_id)
            .ok_or(SceneError::NodeNotFound(node_id))?;
        let unknown = || ConnectError::UnknownPin {
            node: node_id,
            pin: pin.to_string(),
        };
        let spec = *node.pin(pin).ok_or_else(unknown)?;
        if !node.is_pin_free(pin) {
            return Err(ConnectError::PinOccupied {
                node: node_id,
                pin: pin.to_string(),
            }
            .into());
        }
        let point = node.pin_position(pin, &self.layout).ok_or_else(unknown)?;

        let id = WireId(self.alloc_id());
        let mut wire = Wire::new(id);
        wire.start_wire(point, PinRef::new(node_id, pin));
        wire.set_hints(RouteHints::new(Some(spec.side.outward()), None));

        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.bind(pin, id);
        }
        self.wires.insert(id, wire);
        debug!("wire {} started at {}.{}", id, node_id, pin);
        self.dirty = true;
        Ok(id)
    }

    fn drawing_wire_mut(&mut self, id: WireId) -> Result<&mut Wire> {
        let wire = self
            .wires
            .get_mut(&id)
            .ok_or(SceneError::WireNotFound(id))?;
        if !wire.is_drawing() {
            return Err(ConnectError::NotDrawing { wire: id }.into());
        }
        Ok(wire)
    }

    /// Adds a forced waypoint to a wire being drawn.
    pub fn add_wire_point(&mut self, id: WireId, point: Point) -> Result<()> {
        let metrics = self.layout.metrics;
        self.drawing_wire_mut(id)?.add_point(point, &metrics);
        self.dirty = true;
        Ok(())
    }

    /// Moves the free end of a wire being drawn.
    pub fn move_wire_cursor(&mut self, id: WireId, point: Point) -> Result<()> {
        self.drawing_wire_mut(id)?.move_last_point(point);
        self.dirty = true;
        Ok(())
    }

    /// Checks that the drawing wire may end on `node.pin`. Nothing is
    /// mutated.
    pub fn validate_connection(&self, wire_id: WireId, node_id: NodeId, pin: &str) -> Result<()> {
        let wire = self
            .wires
            .get(&wire_id)
            .ok_or(SceneError::WireNotFound(wire_id))?;
        let not_drawing = ConnectError::NotDrawing { wire: wire_id };
        if !wire.is_drawing() {
            return Err(not_drawing.into());
        }
        let start = wire.start().ok_or(not_drawing)?;
        if start.node == node_id {
            return Err(ConnectError::SameNode { node: node_id }.into());
        }

        let node = self
            .nodes
            .get(&node_id)
            .ok_or(SceneError::NodeNotFound(node_id))?;
        let spec = node.pin(pin).ok_or_else(|| ConnectError::UnknownPin {
            node: node_id,
            pin: pin.to_string(),
        })?;
        if !node.is_pin_free(pin) {
            return Err(ConnectError::PinOccupied {
                node: node_id,
                pin: pin.to_string(),
            }
            .into());
        }

        if self.enforce_pin_roles {
            let start_role = self
                .nodes
                .get(&start.node)
                .and_then(|n| n.pin(&start.pin))
                .map(|s| s.role);
            if start_role == Some(spec.role) {
                return Err(ConnectError::RoleMismatch {
                    from: start.pin.clone(),
                    to: pin.to_string(),
                    role: spec.role.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Ends the drawing wire on `node.pin`, binds both pins and routes it.
    ///
    /// On error the wire is left drawing and nothing else changes.
    pub fn complete_wire(&mut self, wire_id: WireId, node_id: NodeId, pin: &str) -> Result<RecalcOutcome> {
        self.validate_connection(wire_id, node_id, pin)?;

        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(SceneError::NodeNotFound(node_id))?;
        let unknown = || ConnectError::UnknownPin {
            node: node_id,
            pin: pin.to_string(),
        };
        let spec = *node.pin(pin).ok_or_else(unknown)?;
        let point = node.pin_position(pin, &self.layout).ok_or_else(unknown)?;
        node.bind(pin, wire_id);

        let wire = self
            .wires
            .get_mut(&wire_id)
            .ok_or(SceneError::WireNotFound(wire_id))?;
        wire.end_wire(point, PinRef::new(node_id, pin));
        let mut hints = wire.hints();
        hints.entry = Some(spec.side.outward().opposite());
        wire.set_hints(hints);

        let outcome = wire.recalc(&mut self.grid, &self.router);
        info!(
            "wire {} connected to {}.{} ({} segments, {} fallbacks)",
            wire_id, node_id, pin, outcome.segments, outcome.fallbacks
        );
        self.dirty = true;
        Ok(outcome)
    }

    /// Discards a wire that is still being drawn.
    pub fn cancel_wire(&mut self, id: WireId) -> Result<()> {
        self.drawing_wire_mut(id)?;
        self.delete_wire(id)?;
        debug!("wire {} cancelled", id);
        Ok(())
    }

    /// Unbinds the wire from both nodes, unregisters it and drops it.
    pub fn delete_wire(&mut self, id: WireId) -> Result<()> {
        let mut wire = self
            .wires
            .remove(&id)
            .ok_or(SceneError::WireNotFound(id))?;
        for pin in [wire.start(), wire.end()].into_iter().flatten() {
            if let Some(node) = self.nodes.get_mut(&pin.node) {
                node.unbind(&pin.pin, id);
            }
        }
        self.grid.unregister_wire(id, &mut wire.footprint);
        debug!("deleted wire {}", id);
        self.dirty = true;
        Ok(())
    }

    /// Moves bound endpoints onto the current pin positions.
    pub fn sync_wire_endpoints(&mut self, id: WireId) -> Result<()> {
        let wire = self.wires.get(&id).ok_or(SceneError::WireNotFound(id))?;
        let start = wire.start().and_then(|p| self.pin_point(p));
        let end = wire.end().and_then(|p| self.pin_point(p));

        let wire = self
            .wires
            .get_mut(&id)
            .ok_or(SceneError::WireNotFound(id))?;
        if let Some(p) = start {
            wire.set_start_point(p);
        }
        if let Some(p) = end {
            wire.set_end_point(p);
        }
        Ok(())
    }

    /// Full re-route of a completed wire from its current pins.
    pub fn recalc_wire(&mut self, id: WireId) -> Result<RecalcOutcome> {
        self.sync_wire_endpoints(id)?;
        let wire = self
            .wires
            .get_mut(&id)
            .ok_or(SceneError::WireNotFound(id))?;
        if !wire.is_completed() {
            return Ok(RecalcOutcome::default());
        }
        let outcome = wire.recalc(&mut self.grid, &self.router);
        self.dirty = true;
        Ok(outcome)
    }

    /// Rigid move without searching.
    pub fn translate_wire(&mut self, id: WireId, dx: f64, dy: f64) -> Result<()> {
        let wire = self
            .wires
            .get_mut(&id)
            .ok_or(SceneError::WireNotFound(id))?;
        wire.translate(dx, dy, &mut self.grid);
        self.dirty = true;
        Ok(())
    }

    /// Follows moved endpoints with the search-free touch-ups.
    pub fn stretch_wire(&mut self, id: WireId) -> Result<()> {
        self.sync_wire_endpoints(id)?;
        let wire = self
            .wires
            .get_mut(&id)
            .ok_or(SceneError::WireNotFound(id))?;
        wire.update_last_segments();
        wire.fix_diagonal_segments();
        self.dirty = true;
        Ok(())
    }

    /// Snaps the interior of a rigidly moved wire back onto cell centres.
    pub fn snap_wire(&mut self, id: WireId) -> Result<()> {
        self.sync_wire_endpoints(id)?;
        let wire = self
            .wires
            .get_mut(&id)
            .ok_or(SceneError::WireNotFound(id))?;
        wire.snap_pos(&mut self.grid);
        wire.fix_diagonal_segments();
        wire.register_path(&mut self.grid);
        self.dirty = true;
        Ok(())
    }

    // ---- queries ----

    /// Topmost node whose selection bounds contain the point, else the
    /// topmost settled wire passing within half the stroke width.
    pub fn hit_test(&self, point: &Point) -> Option<Hit> {
        if let Some(node) = self
            .nodes
            .values()
            .rev()
            .find(|n| n.selection_bounds(&self.layout).contains_point(point.x, point.y))
        {
            return Some(Hit::Node(node.id()));
        }

        let radius = self.layout.design.wire_hit_width / 2.0;
        self.wires
            .values()
            .rev()
            .filter(|w| !w.is_interactive())
            .find(|w| w.is_near(point, radius))
            .map(|w| Hit::Wire(w.id()))
    }

    /// Entities lying strictly inside `area`, topmost first.
    pub fn find_in_box(&self, area: &SelectionBox) -> Vec<Hit> {
        let nodes = self
            .nodes
            .values()
            .rev()
            .filter(|n| area.collide(&n.selection_bounds(&self.layout)))
            .map(|n| Hit::Node(n.id()));
        let wires = self
            .wires
            .values()
            .rev()
            .filter(|w| w.bounds().is_some_and(|b| area.collide(&b)))
            .map(|w| Hit::Wire(w.id()));
        nodes.chain(wires).collect()
    }

    pub fn entity_bounds(&self, hit: Hit) -> Option<Bounds> {
        match hit {
            Hit::Node(id) => self.nodes.get(&id).map(|n| n.selection_bounds(&self.layout)),
            Hit::Wire(id) => self.wires.get(&id).and_then(|w| w.bounds()),
        }
    }

    /// Union of the bounds of every listed entity.
    pub fn merge_bounds(&self, hits: &[Hit]) -> Option<Bounds> {
        hits.iter()
            .filter_map(|h| self.entity_bounds(*h))
            .reduce(|a, b| a.merge(&b))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
