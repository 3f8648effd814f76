//! Wire-creation tool.

use super::ToolSignal;
use crate::node::NodeHit;
use crate::scene::Scene;
use tracing::{debug, info, warn};
use wiregrid_core::constants::CREATE_WIRE_PRIORITY;
use wiregrid_core::{Error, Hit, NodeId, PointerEvent, SceneError, WireId};

/// Draws one wire from a free pin to a free pin on another node.
///
/// Clicks on empty space or on an existing wire add waypoints. A
/// right-button down discards the wire.
#[derive(Debug, Clone, Default)]
pub struct CreateWireTool {
    current: Option<WireId>,
}

impl CreateWireTool {
    pub const PRIORITY: i32 = CREATE_WIRE_PRIORITY;

    pub fn new() -> Self {
        Self::default()
    }

    /// Wire being drawn.
    pub fn current(&self) -> Option<WireId> {
        self.current
    }

    fn pin_under(event: &PointerEvent, hit: Option<Hit>, scene: &Scene) -> Option<(NodeId, String)> {
        let id = hit?.node()?;
        match scene.node_hit(id, &event.world)? {
            NodeHit::Pin { name, .. } => Some((id, name)),
            NodeHit::Body => None,
        }
    }

    /// Left-button down on a pin that carries no wire.
    pub fn is_valid(&self, event: &PointerEvent, hit: Option<Hit>, scene: &Scene) -> bool {
        if !event.is_left() {
            return false;
        }
        Self::pin_under(event, hit, scene).is_some_and(|(node, pin)| {
            scene.node(node).is_some_and(|n| n.is_pin_free(&pin))
        })
    }

    /// Never displaced by a down; the tool restores itself.
    pub fn is_unlocked(&self) -> bool {
        false
    }

    pub fn load(&mut self, _scene: &mut Scene) {
        self.current = None;
    }

    pub fn reset(&mut self, scene: &mut Scene) {
        if let Some(wire) = self.current.take() {
            if let Err(e) = scene.cancel_wire(wire) {
                debug!("discarding wire {}: {}", wire, e);
            }
        }
    }

    pub fn on_down(&mut self, event: &PointerEvent, hit: Option<Hit>, scene: &mut Scene) -> ToolSignal {
        if event.is_right() {
            if let Some(wire) = self.current.take() {
                info!("wire {} cancelled", wire);
                if let Err(e) = scene.cancel_wire(wire) {
                    warn!("cancel failed: {}", e);
                }
            }
            return ToolSignal::Restore;
        }
        if !event.is_left() {
            return ToolSignal::Continue;
        }

        let pin = Self::pin_under(event, hit, scene);
        match (self.current, pin) {
            (None, Some((node, pin))) => match scene.begin_wire(node, &pin) {
                Ok(wire) => {
                    self.current = Some(wire);
                    ToolSignal::Continue
                }
                Err(e) => {
                    warn!("cannot start wire: {}", e);
                    ToolSignal::Restore
                }
            },
            (None, None) => ToolSignal::Restore,
            (Some(wire), Some((node, pin))) => match scene.complete_wire(wire, node, &pin) {
                Ok(_) => {
                    self.current = None;
                    ToolSignal::Restore
                }
                Err(e) => {
                    warn!("rejected connection: {}", e);
                    ToolSignal::Continue
                }
            },
            (Some(wire), None) => {
                if matches!(hit, Some(Hit::Node(_))) {
                    // Inside a node body; not a usable waypoint.
                    return ToolSignal::Continue;
                }
                match scene.add_wire_point(wire, event.world) {
                    Err(Error::Scene(SceneError::WireNotFound(_))) => self.drop_lost(wire),
                    Err(e) => {
                        warn!("cannot add waypoint: {}", e);
                        ToolSignal::Continue
                    }
                    Ok(()) => ToolSignal::Continue,
                }
            }
        }
    }

    /// The wire was deleted behind the tool, e.g. with its start node.
    fn drop_lost(&mut self, wire: WireId) -> ToolSignal {
        debug!("wire {} no longer exists", wire);
        self.current = None;
        ToolSignal::Restore
    }

    /// Live preview of the free end.
    pub fn on_move(&mut self, event: &PointerEvent, scene: &mut Scene) -> ToolSignal {
        let Some(wire) = self.current else {
            return ToolSignal::Continue;
        };
        match scene.move_wire_cursor(wire, event.world) {
            Err(Error::Scene(SceneError::WireNotFound(_))) => self.drop_lost(wire),
            Err(e) => {
                debug!("preview skipped: {}", e);
                ToolSignal::Continue
            }
            Ok(()) => ToolSignal::Continue,
        }
    }
}
