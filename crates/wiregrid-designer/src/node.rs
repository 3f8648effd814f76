//! Placed nodes and their pins.
//!
//! A node is a box spanning `col_span` x `row_span` grid cells, centred on
//! its `position`, with named pins on its four edges. Pins sit on cell
//! centres along their edge, just outside the body.

use crate::grid::{CellFootprint, GridMetrics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wiregrid_core::{Bounds, Direction, NodeId, Point, WireId};
use wiregrid_settings::{Config, NodeDesign};

/// Pin role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinRole {
    Input,
    Output,
}

impl std::fmt::Display for PinRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Node edge carrying a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl PinSide {
    /// Direction pointing away from the body.
    pub fn outward(self) -> Direction {
        match self {
            Self::Left => Direction::Left,
            Self::Right => Direction::Right,
            Self::Top => Direction::Up,
            Self::Bottom => Direction::Down,
        }
    }

    /// True for the top and bottom edges, whose pins are indexed by column.
    pub fn is_horizontal_edge(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinSpec {
    pub side: PinSide,
    /// Cell index along the edge, counted from the left or top
    pub index: u32,
    pub role: PinRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Input,
    Output,
    Logic,
}

/// Static description of a node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub name: String,
    pub kind: NodeKind,
    pub col_span: u32,
    pub row_span: u32,
    pub show_label: bool,
    pub show_pin_labels: bool,
    pub pins: BTreeMap<String, PinSpec>,
}

impl NodeConfig {
    pub fn new(name: impl Into<String>, kind: NodeKind, col_span: u32, row_span: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            col_span: col_span.max(1),
            row_span: row_span.max(1),
            show_label: true,
            show_pin_labels: true,
            pins: BTreeMap::new(),
        }
    }

    pub fn with_pin(mut self, name: impl Into<String>, side: PinSide, index: u32, role: PinRole) -> Self {
        self.pins.insert(name.into(), PinSpec { side, index, role });
        self
    }

    /// Three-by-four gate with inputs A (top) and B (left), outputs C (right)
    /// and D (bottom).
    pub fn and_gate() -> Self {
        Self::new("AND", NodeKind::Logic, 3, 4)
            .with_pin("A", PinSide::Top, 0, PinRole::Input)
            .with_pin("B", PinSide::Left, 2, PinRole::Input)
            .with_pin("C", PinSide::Right, 1, PinRole::Output)
            .with_pin("D", PinSide::Bottom, 1, PinRole::Output)
    }

    /// Cells along the given edge.
    pub fn edge_len(&self, side: PinSide) -> u32 {
        if side.is_horizontal_edge() {
            self.col_span
        } else {
            self.row_span
        }
    }
}

/// Geometry shared by every node in a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    pub metrics: GridMetrics,
    pub design: NodeDesign,
}

impl NodeLayout {
    pub fn new(metrics: GridMetrics, design: NodeDesign) -> Self {
        Self { metrics, design }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            GridMetrics::new(config.grid.cell_size),
            config.node_design.clone(),
        )
    }

    pub fn cell_size(&self) -> f64 {
        self.metrics.cell_size()
    }

    /// Distance from the body edge to a pin's attachment point.
    fn pin_offset(&self) -> f64 {
        self.design.margin - self.design.pin_length / 2.0 + 2.0
    }
}

impl Default for NodeLayout {
    fn default() -> Self {
        Self::new(GridMetrics::default(), NodeDesign::default())
    }
}

/// Result of testing a point against a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeHit {
    /// Inside the body, away from the pin band
    Body,
    /// On a pin; `position` is the wire attachment point
    Pin {
        name: String,
        position: Point,
        role: PinRole,
    },
}

/// A node placed in the scene.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) config: NodeConfig,
    pub(crate) position: Point,
    pub(crate) footprint: CellFootprint,
    bindings: BTreeMap<String, WireId>,
}

impl Node {
    pub fn new(id: NodeId, config: NodeConfig, position: Point) -> Self {
        Self {
            id,
            config,
            position,
            footprint: CellFootprint::new(),
            bindings: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Centre in world space.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn footprint(&self) -> &CellFootprint {
        &self.footprint
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.translated(dx, dy);
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn half_extents(&self, layout: &NodeLayout) -> (f64, f64) {
        let cs = layout.cell_size();
        (
            self.config.col_span as f64 * cs / 2.0,
            self.config.row_span as f64 * cs / 2.0,
        )
    }

    /// Body rectangle.
    pub fn body_bounds(&self, layout: &NodeLayout) -> Bounds {
        let (hw, hh) = self.half_extents(layout);
        let p = self.position;
        Bounds::new(p.x - hw, p.y - hh, p.x + hw, p.y + hh)
    }

    /// Body rectangle grown by the design margin.
    pub fn selection_bounds(&self, layout: &NodeLayout) -> Bounds {
        let (hw, hh) = self.half_extents(layout);
        let m = layout.design.margin;
        let p = self.position;
        Bounds::new(p.x - hw - m, p.y - hh - m, p.x + hw + m, p.y + hh + m)
    }

    /// Grid-aligned centre for `position`: the nearest grid line along even
    /// spans, the nearest cell midpoint along odd spans. Idempotent.
    pub fn snapped_center(config: &NodeConfig, position: &Point, metrics: &GridMetrics) -> Point {
        let cs = metrics.cell_size();
        let snap = |v: f64, span: u32| {
            if span % 2 == 1 {
                ((v - cs / 2.0) / cs).round() * cs + cs / 2.0
            } else {
                (v / cs).round() * cs
            }
        };
        Point::new(
            snap(position.x, config.col_span),
            snap(position.y, config.row_span),
        )
    }

    pub fn pin(&self, name: &str) -> Option<&PinSpec> {
        self.config.pins.get(name)
    }

    fn pin_point(&self, spec: &PinSpec, layout: &NodeLayout) -> Point {
        let cs = layout.cell_size();
        let (hw, hh) = self.half_extents(layout);
        let offset = layout.pin_offset();
        let along = spec.index as f64 * cs + cs / 2.0;
        let c = self.position;
        match spec.side {
            PinSide::Top => Point::new(c.x - hw + along, c.y - hh - offset),
            PinSide::Bottom => Point::new(c.x - hw + along, c.y + hh + offset),
            PinSide::Left => Point::new(c.x - hw - offset, c.y - hh + along),
            PinSide::Right => Point::new(c.x + hw + offset, c.y - hh + along),
        }
    }

    /// Wire attachment point of a pin.
    pub fn pin_position(&self, name: &str, layout: &NodeLayout) -> Option<Point> {
        self.pin(name).map(|spec| self.pin_point(spec, layout))
    }

    /// Drawn rectangle of a pin.
    pub fn pin_rect(&self, name: &str, layout: &NodeLayout) -> Option<Bounds> {
        let spec = self.pin(name)?;
        let cs = layout.cell_size();
        let (hw, hh) = self.half_extents(layout);
        let half_w = layout.design.pin_width / 2.0;
        let half_l = layout.design.pin_length / 2.0;
        let gap = layout.design.margin / 2.0;
        let along = spec.index as f64 * cs + cs / 2.0;
        let c = self.position;
        let (x, y, rx, ry) = match spec.side {
            PinSide::Top => (c.x - hw + along, c.y - hh - gap, half_w, half_l),
            PinSide::Bottom => (c.x - hw + along, c.y + hh + gap, half_w, half_l),
            PinSide::Left => (c.x - hw - gap, c.y - hh + along, half_l, half_w),
            PinSide::Right => (c.x + hw + gap, c.y - hh + along, half_l, half_w),
        };
        Some(Bounds::new(x - rx, y - ry, x + rx, y + ry))
    }

    /// Classifies a point as body, pin, or neither.
    ///
    /// Points deeper than `hit_tolerance` inside the edge are body. Points in
    /// the band around an edge resolve to the pin whose cell slot they fall
    /// in; slots are `pin_width` wide and alternate gap/pin along the edge.
    pub fn hit_test(&self, p: &Point, layout: &NodeLayout) -> Option<NodeHit> {
        let tolerance = layout.design.hit_tolerance;
        let slot = layout.design.pin_width;
        let (hw, hh) = self.half_extents(layout);
        let dx = p.x - self.position.x;
        let dy = p.y - self.position.y;

        if dx.abs() <= hw - tolerance && dy.abs() <= hh - tolerance {
            return Some(NodeHit::Body);
        }

        let slot_index = |value: f64, max: u32| -> Option<u32> {
            let k = (value / slot).round() as i64;
            if k % 2 == 0 {
                return None;
            }
            let idx = (k - 1) / 2;
            (0..max as i64).contains(&idx).then_some(idx as u32)
        };

        let (side, index) = if dy.abs() > hh - tolerance {
            let side = if dy < 0.0 { PinSide::Top } else { PinSide::Bottom };
            (side, slot_index(dx + hw, self.config.col_span)?)
        } else {
            let side = if dx < 0.0 { PinSide::Left } else { PinSide::Right };
            (side, slot_index(dy + hh, self.config.row_span)?)
        };

        self.config
            .pins
            .iter()
            .find(|(_, spec)| spec.side == side && spec.index == index)
            .map(|(name, spec)| NodeHit::Pin {
                name: name.clone(),
                position: self.pin_point(spec, layout),
                role: spec.role,
            })
    }

    /// Wire bound to a pin.
    pub fn binding(&self, pin: &str) -> Option<WireId> {
        self.bindings.get(pin).copied()
    }

    /// True when the pin exists and carries no wire.
    pub fn is_pin_free(&self, pin: &str) -> bool {
        self.config.pins.contains_key(pin) && !self.bindings.contains_key(pin)
    }

    pub(crate) fn bind(&mut self, pin: &str, wire: WireId) {
        self.bindings.insert(pin.to_string(), wire);
    }

    /// Unbinds the pin if it carries `wire`.
    pub(crate) fn unbind(&mut self, pin: &str, wire: WireId) -> bool {
        if self.bindings.get(pin) == Some(&wire) {
            self.bindings.remove(pin);
            true
        } else {
            false
        }
    }

    /// Pin bindings in pin-name order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, WireId)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Distinct wires attached to any pin.
    pub fn connected_wires(&self) -> Vec<WireId> {
        let mut wires: Vec<WireId> = self.bindings.values().copied().collect();
        wires.sort();
        wires.dedup();
        wires
    }
}
