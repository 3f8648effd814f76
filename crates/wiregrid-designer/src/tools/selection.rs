//! Selection tool: rubber-band selection and group dragging.

use super::ToolSignal;
use crate::node::NodeHit;
use crate::scene::Scene;
use std::collections::BTreeSet;
use tracing::{debug, warn};
use wiregrid_core::constants::SELECTION_PRIORITY;
use wiregrid_core::{Hit, NodeId, PointerEvent, Result, WireId};

#[derive(Debug, Clone, Default)]
pub struct SelectionTool {
    /// Selected entities, topmost first
    hits: Vec<Hit>,
    nodes: BTreeSet<NodeId>,
    /// Wires with both endpoints on selected nodes; these move rigidly
    rigid_wires: BTreeSet<WireId>,
    /// Wires with exactly one endpoint on a selected node; these stretch
    attached_wires: BTreeSet<WireId>,
    banding: bool,
    dragging: bool,
}

fn report<T>(result: Result<T>, action: &str) {
    if let Err(e) = result {
        warn!("selection {} failed: {}", action, e);
    }
}

impl SelectionTool {
    pub const PRIORITY: i32 = SELECTION_PRIORITY;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &[Hit] {
        &self.hits
    }

    pub fn selected_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn rigid_wires(&self) -> impl Iterator<Item = WireId> + '_ {
        self.rigid_wires.iter().copied()
    }

    pub fn attached_wires(&self) -> impl Iterator<Item = WireId> + '_ {
        self.attached_wires.iter().copied()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Left-button down on empty space or on a node body.
    pub fn is_valid(&self, event: &PointerEvent, hit: Option<Hit>, scene: &Scene) -> bool {
        if !event.is_left() {
            return false;
        }
        match hit {
            None => true,
            Some(Hit::Node(id)) => scene.node_hit(id, &event.world) == Some(NodeHit::Body),
            Some(Hit::Wire(_)) => false,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn load(&mut self, _scene: &mut Scene) {
        self.banding = false;
        self.dragging = false;
    }

    pub fn reset(&mut self, scene: &mut Scene) {
        self.clear(scene);
    }

    fn clear(&mut self, scene: &mut Scene) {
        self.hits.clear();
        self.nodes.clear();
        self.rigid_wires.clear();
        self.attached_wires.clear();
        self.banding = false;
        self.dragging = false;
        scene.selection_box_mut().clear();
    }

    /// Caches the selection and classifies every wire touching it.
    fn select(&mut self, scene: &mut Scene, hits: Vec<Hit>) {
        self.nodes = hits.iter().filter_map(|h| h.node()).collect();
        self.rigid_wires.clear();
        self.attached_wires.clear();

        for node in &self.nodes {
            for wire_id in scene.connected_wires(*node) {
                let Some(wire) = scene.wire(wire_id) else {
                    continue;
                };
                let both = match wire.nodes() {
                    (Some(a), Some(b)) => self.nodes.contains(&a) && self.nodes.contains(&b),
                    _ => false,
                };
                if both {
                    self.rigid_wires.insert(wire_id);
                } else {
                    self.attached_wires.insert(wire_id);
                }
            }
        }

        self.hits = hits;
        self.fit_box(scene);
        debug!(
            "selected {} nodes, {} rigid wires, {} attached wires",
            self.nodes.len(),
            self.rigid_wires.len(),
            self.attached_wires.len()
        );
    }

    fn fit_box(&self, scene: &mut Scene) {
        if let Some(bounds) = scene.merge_bounds(&self.hits) {
            scene.selection_box_mut().fit(&bounds);
        }
    }

    pub fn on_down(&mut self, event: &PointerEvent, hit: Option<Hit>, scene: &mut Scene) -> ToolSignal {
        let p = event.world;

        if !self.hits.is_empty() {
            let on_pin = match hit {
                Some(Hit::Node(id)) => matches!(scene.node_hit(id, &p), Some(NodeHit::Pin { .. })),
                _ => false,
            };
            if scene.selection_box().inside(p.x, p.y) && !on_pin {
                self.dragging = true;
                return ToolSignal::Continue;
            }
            self.clear(scene);
            return ToolSignal::Handoff;
        }

        match hit {
            None => {
                self.clear(scene);
                scene.selection_box_mut().set_start(p);
                self.banding = true;
            }
            Some(Hit::Node(id)) => {
                self.select(scene, vec![Hit::Node(id)]);
                self.dragging = true;
            }
            Some(Hit::Wire(_)) => {}
        }
        ToolSignal::Continue
    }

    pub fn on_drag(&mut self, event: &PointerEvent, scene: &mut Scene) -> ToolSignal {
        if self.dragging {
            let (dx, dy) = (event.delta.x, event.delta.y);
            for node in &self.nodes {
                report(scene.translate_node(*node, dx, dy), "translate");
            }
            for wire in &self.rigid_wires {
                report(scene.translate_wire(*wire, dx, dy), "translate");
            }
            for wire in &self.attached_wires {
                report(scene.stretch_wire(*wire), "stretch");
            }
            scene.selection_box_mut().drag(dx, dy);
        } else if self.banding {
            scene.selection_box_mut().set_last(event.world);
        }
        ToolSignal::Continue
    }

    pub fn on_up(&mut self, _event: &PointerEvent, scene: &mut Scene) -> ToolSignal {
        if self.dragging {
            self.dragging = false;
            for node in &self.nodes {
                report(scene.snap_node(*node), "snap");
            }
            for wire in &self.rigid_wires {
                report(scene.snap_wire(*wire), "snap");
            }
            for wire in &self.attached_wires {
                report(scene.recalc_wire(*wire), "recalc");
            }
            self.fit_box(scene);
            return ToolSignal::Continue;
        }

        if self.banding {
            self.banding = false;
            let area = *scene.selection_box();
            let found = if area.is_empty() {
                Vec::new()
            } else {
                scene.find_in_box(&area)
            };
            let nodes: BTreeSet<NodeId> = found.iter().filter_map(|h| h.node()).collect();
            let kept: Vec<Hit> = found
                .into_iter()
                .filter(|h| match h {
                    Hit::Node(_) => true,
                    Hit::Wire(id) => scene.wire(*id).is_some_and(|w| match w.nodes() {
                        (Some(a), Some(b)) => nodes.contains(&a) && nodes.contains(&b),
                        _ => false,
                    }),
                })
                .collect();

            if kept.is_empty() {
                self.clear(scene);
            } else {
                self.select(scene, kept);
            }
        }
        ToolSignal::Continue
    }
}
