//! Wire routing session.
//!
//! A wire keeps two point lists:
//! - logical waypoints: the pin points plus every point the user clicked
//!   while drawing, which the route is forced through;
//! - the rendered path: the simplified, obstacle-aware polyline that is
//!   drawn and registered in the occupancy grid.
//!
//! The wire only handles geometry. Pin compatibility and node bindings are
//! checked and recorded by the scene.

use crate::grid::{CellFootprint, GridMetrics, OccupancyGrid};
use crate::router::{RouteHints, WireRouter};
use crate::simplify::{dedup_consecutive, densify, fix_diagonal_segments, simplify_path};
use serde::Serialize;
use tracing::{debug, warn};
use wiregrid_core::{Bounds, NodeId, Point, WireId};

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireState {
    Empty,
    /// Start bound, free end follows the cursor
    Drawing,
    /// Both ends bound
    Completed,
}

/// Stroke cap for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapStyle {
    Round,
    Square,
}

/// Wire endpoint binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRef {
    pub node: NodeId,
    pub pin: String,
}

impl PinRef {
    pub fn new(node: NodeId, pin: impl Into<String>) -> Self {
        Self {
            node,
            pin: pin.into(),
        }
    }
}

/// Summary of one `recalc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecalcOutcome {
    /// Waypoint pairs routed
    pub segments: usize,
    /// Pairs that fell back to a straight segment
    pub fallbacks: usize,
}

#[derive(Debug, Clone)]
pub struct Wire {
    id: WireId,
    state: WireState,
    interactive: bool,
    start: Option<PinRef>,
    end: Option<PinRef>,
    start_point: Point,
    end_point: Point,
    waypoints: Vec<Point>,
    path: Vec<Point>,
    pub(crate) footprint: CellFootprint,
    hints: RouteHints,
}

impl Wire {
    pub fn new(id: WireId) -> Self {
        Self {
            id,
            state: WireState::Empty,
            interactive: false,
            start: None,
            end: None,
            start_point: Point::default(),
            end_point: Point::default(),
            waypoints: Vec::new(),
            path: Vec::new(),
            footprint: CellFootprint::new(),
            hints: RouteHints::default(),
        }
    }

    pub fn id(&self) -> WireId {
        self.id
    }

    pub fn state(&self) -> WireState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == WireState::Drawing
    }

    pub fn is_completed(&self) -> bool {
        self.state == WireState::Completed
    }

    /// True while the free end follows the cursor.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn start(&self) -> Option<&PinRef> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&PinRef> {
        self.end.as_ref()
    }

    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn end_point(&self) -> Point {
        self.end_point
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Rendered polyline.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn footprint(&self) -> &CellFootprint {
        &self.footprint
    }

    pub fn hints(&self) -> RouteHints {
        self.hints
    }

    pub fn set_hints(&mut self, hints: RouteHints) {
        self.hints = hints;
    }

    /// Start and end nodes.
    pub fn nodes(&self) -> (Option<NodeId>, Option<NodeId>) {
        (
            self.start.as_ref().map(|p| p.node),
            self.end.as_ref().map(|p| p.node),
        )
    }

    pub fn touches(&self, node: NodeId) -> bool {
        let (a, b) = self.nodes();
        a == Some(node) || b == Some(node)
    }

    pub fn cap_style(&self) -> CapStyle {
        if self.is_completed() {
            CapStyle::Square
        } else {
            CapStyle::Round
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.path)
    }

    /// True when `p` is within `radius` of any rendered segment.
    pub fn is_near(&self, p: &Point, radius: f64) -> bool {
        match self.path.as_slice() {
            [] => false,
            [only] => p.distance_to(only) <= radius,
            path => path
                .windows(2)
                .any(|s| p.distance_to_segment(&s[0], &s[1]) <= radius),
        }
    }

    /// Binds the start pin and begins following the cursor.
    pub fn start_wire(&mut self, point: Point, pin: PinRef) {
        self.start = Some(pin);
        self.end = None;
        self.start_point = point;
        self.end_point = point;
        self.waypoints = vec![point, point];
        self.path = self.waypoints.clone();
        self.state = WireState::Drawing;
        self.interactive = true;
    }

    /// Moves the free end for live preview.
    pub fn move_last_point(&mut self, point: Point) {
        if !self.interactive {
            return;
        }
        self.end_point = point;
        if let Some(last) = self.waypoints.last_mut() {
            *last = point;
        }
        if let Some(last) = self.path.last_mut() {
            *last = point;
        }
    }

    /// Inserts a forced waypoint at the centre of the cell containing `point`.
    pub fn add_point(&mut self, point: Point, metrics: &GridMetrics) {
        let p = metrics.snap_to_center(&point);
        let at = self.waypoints.len().saturating_sub(1);
        self.waypoints.insert(at, p);
        if self.interactive {
            self.path = self.waypoints.clone();
        }
    }

    /// Binds the end pin and marks the wire completed.
    ///
    /// The caller records the bindings and triggers [`Wire::recalc`].
    pub fn end_wire(&mut self, point: Point, pin: PinRef) {
        self.end = Some(pin);
        self.end_point = point;
        if let Some(last) = self.waypoints.last_mut() {
            *last = point;
        }
        self.state = WireState::Completed;
        self.interactive = false;
    }

    /// Re-anchors the start at a pin position.
    pub fn set_start_point(&mut self, point: Point) {
        self.start_point = point;
        if let Some(first) = self.waypoints.first_mut() {
            *first = point;
        }
        if let Some(first) = self.path.first_mut() {
            *first = point;
        }
    }

    /// Re-anchors the end at a pin position.
    pub fn set_end_point(&mut self, point: Point) {
        self.end_point = point;
        if let Some(last) = self.waypoints.last_mut() {
            *last = point;
        }
        if let Some(last) = self.path.last_mut() {
            *last = point;
        }
    }

    /// Routes every waypoint pair, registers the result and stores the
    /// simplified polyline bracketed by the exact pin points.
    pub fn recalc(&mut self, grid: &mut OccupancyGrid, router: &WireRouter) -> RecalcOutcome {
        grid.unregister_wire(self.id, &mut self.footprint);

        let mut outcome = RecalcOutcome::default();
        let mut routed: Vec<Point> = Vec::new();
        let pairs = self.waypoints.len().saturating_sub(1);

        for i in 0..pairs {
            let from = self.waypoints[i];
            let to = self.waypoints[i + 1];
            let hints = RouteHints {
                exit: if i == 0 { self.hints.exit } else { None },
                entry: if i + 1 == pairs { self.hints.entry } else { None },
            };

            let mut segment = router.route(grid, from, to, hints, Some(self.id));
            outcome.segments += 1;
            if segment.is_empty() {
                warn!(
                    "wire {} segment {} unroutable, using straight fallback",
                    self.id, i
                );
                outcome.fallbacks += 1;
                segment = densify(&[from, to], grid.metrics().cell_size());
            }

            if routed.is_empty() {
                routed.extend(segment);
            } else {
                routed.extend(segment.into_iter().skip(1));
            }
        }

        grid.register_wire_path(self.id, &mut self.footprint, &routed);

        let mut full = Vec::with_capacity(routed.len() + 2);
        full.push(self.start_point);
        full.extend(routed);
        full.push(self.end_point);
        dedup_consecutive(&mut full);
        self.path = simplify_path(&full);

        debug!(
            "wire {} routed: {} points, {} fallbacks",
            self.id,
            self.path.len(),
            outcome.fallbacks
        );
        outcome
    }

    /// Rigidly shifts the wire and re-registers it without searching.
    pub fn translate(&mut self, dx: f64, dy: f64, grid: &mut OccupancyGrid) {
        for p in self.path.iter_mut().chain(self.waypoints.iter_mut()) {
            *p = p.translated(dx, dy);
        }
        self.start_point = self.start_point.translated(dx, dy);
        self.end_point = self.end_point.translated(dx, dy);
        self.register_path(grid);
    }

    /// Realigns the points next to each endpoint with that endpoint along the
    /// pin's exit axis.
    pub fn update_last_segments(&mut self) {
        let n = self.path.len();
        if n <= 2 {
            return;
        }
        let start_horizontal = self.hints.exit.is_none_or(|d| d.is_horizontal());
        let end_horizontal = self.hints.entry.is_none_or(|d| d.is_horizontal());

        let start = self.start_point;
        let end = self.end_point;
        // On a single-corner path both writes hit path[1]; the start side wins.
        let prev = &mut self.path[n - 2];
        if end_horizontal {
            prev.y = end.y;
        } else {
            prev.x = end.x;
        }
        let next = &mut self.path[1];
        if start_horizontal {
            next.y = start.y;
        } else {
            next.x = start.x;
        }
    }

    /// Splits diagonal segments left by endpoint movement into right angles.
    pub fn fix_diagonal_segments(&mut self) {
        self.path = fix_diagonal_segments(&self.path);
    }

    /// Snaps every interior rendered point to its cell centre and
    /// re-registers the path. Endpoints stay on their pins.
    pub fn snap_pos(&mut self, grid: &mut OccupancyGrid) {
        let metrics = *grid.metrics();
        let n = self.path.len();
        if n > 2 {
            for p in &mut self.path[1..n - 1] {
                *p = metrics.snap_to_center(p);
            }
        }
        self.register_path(grid);
    }

    /// Registers every cell crossed by the rendered path.
    pub fn register_path(&mut self, grid: &mut OccupancyGrid) {
        let step = grid.metrics().cell_size();
        let dense = densify(&self.path, step);
        grid.register_wire_path(self.id, &mut self.footprint, &dense);
    }
}
