//! Render list handed to the drawing back end.
//!
//! The list is rebuilt from the scene on demand and carries only resolved
//! geometry, so a renderer never needs access to the scene itself. Wires
//! are listed before nodes so that nodes draw over wire ends.

use crate::node::{PinRole, PinSide};
use crate::scene::Scene;
use crate::wire::CapStyle;
use serde::Serialize;
use wiregrid_core::constants::WIRE_STROKE_WIDTH;
use wiregrid_core::{Bounds, NodeId, Point, WireId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinDraw {
    pub name: String,
    pub side: PinSide,
    pub role: PinRole,
    pub rect: Bounds,
    /// Label anchor, `None` when pin labels are hidden
    pub label: Option<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
    Node {
        id: NodeId,
        name: String,
        /// Label anchor, `None` when the node label is hidden
        label: Option<Point>,
        bounds: Bounds,
        corner_radius: f64,
        pins: Vec<PinDraw>,
    },
    Wire {
        id: WireId,
        points: Vec<Point>,
        cap: CapStyle,
        stroke_width: f64,
        completed: bool,
    },
    SelectionBox {
        bounds: Bounds,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn from_scene(scene: &Scene) -> Self {
        let layout = scene.layout();
        let mut commands = Vec::with_capacity(scene.node_count() + scene.wire_count() + 1);

        for wire in scene.wires() {
            if wire.path().is_empty() {
                continue;
            }
            commands.push(DrawCommand::Wire {
                id: wire.id(),
                points: wire.path().to_vec(),
                cap: wire.cap_style(),
                stroke_width: WIRE_STROKE_WIDTH,
                completed: wire.is_completed(),
            });
        }

        for node in scene.nodes() {
            let config = node.config();
            let pins = config
                .pins
                .iter()
                .filter_map(|(name, spec)| {
                    let rect = node.pin_rect(name, layout)?;
                    let label = if config.show_pin_labels {
                        let at = node.pin_position(name, layout)?;
                        let (dx, dy) = spec.side.outward().delta();
                        let k = layout.design.label_offset;
                        Some(at.translated(-dx as f64 * k, -dy as f64 * k))
                    } else {
                        None
                    };
                    Some(PinDraw {
                        name: name.clone(),
                        side: spec.side,
                        role: spec.role,
                        rect,
                        label,
                    })
                })
                .collect();

            commands.push(DrawCommand::Node {
                id: node.id(),
                name: config.name.clone(),
                label: config.show_label.then(|| node.position()),
                bounds: node.body_bounds(layout),
                corner_radius: layout.design.corner_radius,
                pins,
            });
        }

        if let Some(bounds) = scene.selection_box().bounds() {
            commands.push(DrawCommand::SelectionBox { bounds });
        }

        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    /// Overall extent of everything in the list.
    pub fn bounds(&self) -> Option<Bounds> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Node { bounds, pins, .. } => Some(
                    pins.iter()
                        .fold(*bounds, |acc, pin| acc.merge(&pin.rect)),
                ),
                DrawCommand::Wire { points, .. } => Bounds::from_points(points),
                DrawCommand::SelectionBox { bounds } => Some(*bounds),
            })
            .reduce(|a, b| a.merge(&b))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
