//! Interaction tools and the state machine that activates them.
//!
//! Tools form a closed set dispatched by `match`. Each one answers whether a
//! pointer-down may activate it, whether it can be displaced by the next
//! down, and handles pointer events by returning a [`ToolSignal`] that tells
//! the manager what to do next.
//!
//! The manager keeps a registry sorted by descending priority and a stack
//! of active tools:
//! - on down, an unlocked top tool is popped and reset (unless marked
//!   `keep`), then the first valid registered tool is pushed when the stack
//!   is empty, then the top tool receives the event;
//! - every other event goes to the top tool only;
//! - `Restore` pops and resets the top tool, `Handoff` does the same and
//!   replays the same down through activation once more.

pub mod create_wire;
pub mod selection;

pub use create_wire::CreateWireTool;
pub use selection::SelectionTool;

use crate::scene::Scene;
use tracing::{debug, trace};
use wiregrid_core::{Hit, PointerEvent, PointerEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Selection,
    CreateWire,
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Selection => write!(f, "selection"),
            Self::CreateWire => write!(f, "create-wire"),
        }
    }
}

/// Transition requested by a tool handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSignal {
    /// Stay active
    Continue,
    /// Deactivate and reset
    Restore,
    /// Deactivate, reset, and let another tool take the same event
    Handoff,
}

#[derive(Debug, Clone)]
pub enum Tool {
    CreateWire(CreateWireTool),
    Selection(SelectionTool),
}

impl Tool {
    pub fn kind(&self) -> ToolKind {
        match self {
            Tool::CreateWire(_) => ToolKind::CreateWire,
            Tool::Selection(_) => ToolKind::Selection,
        }
    }

    pub fn priority(&self) -> i32 {
        match self {
            Tool::CreateWire(_) => CreateWireTool::PRIORITY,
            Tool::Selection(_) => SelectionTool::PRIORITY,
        }
    }

    /// Whether this tool may activate on a pointer-down.
    pub fn is_valid(&self, event: &PointerEvent, hit: Option<Hit>, scene: &Scene) -> bool {
        match self {
            Tool::CreateWire(t) => t.is_valid(event, hit, scene),
            Tool::Selection(t) => t.is_valid(event, hit, scene),
        }
    }

    /// Whether the next pointer-down may displace this tool.
    pub fn is_unlocked(&self) -> bool {
        match self {
            Tool::CreateWire(t) => t.is_unlocked(),
            Tool::Selection(t) => t.is_unlocked(),
        }
    }

    pub fn load(&mut self, scene: &mut Scene) {
        match self {
            Tool::CreateWire(t) => t.load(scene),
            Tool::Selection(t) => t.load(scene),
        }
    }

    pub fn reset(&mut self, scene: &mut Scene) {
        match self {
            Tool::CreateWire(t) => t.reset(scene),
            Tool::Selection(t) => t.reset(scene),
        }
    }

    /// Routes an event to the handler for its kind.
    pub fn handle(&mut self, event: &PointerEvent, hit: Option<Hit>, scene: &mut Scene) -> ToolSignal {
        match (self, event.kind) {
            (Tool::CreateWire(t), PointerEventKind::Down) => t.on_down(event, hit, scene),
            (Tool::CreateWire(t), PointerEventKind::Move | PointerEventKind::Drag) => {
                t.on_move(event, scene)
            }
            (Tool::CreateWire(_), _) => ToolSignal::Continue,

            (Tool::Selection(t), PointerEventKind::Down) => t.on_down(event, hit, scene),
            (Tool::Selection(t), PointerEventKind::Drag) => t.on_drag(event, scene),
            (Tool::Selection(t), PointerEventKind::Up | PointerEventKind::Outside) => {
                t.on_up(event, scene)
            }
            (Tool::Selection(_), _) => ToolSignal::Continue,
        }
    }
}

#[derive(Debug, Clone)]
struct ToolSlot {
    tool: Tool,
    keep: bool,
}

/// Priority registry plus the stack of active tools.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    slots: Vec<ToolSlot>,
    stack: Vec<usize>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the wire-creation and selection tools.
    pub fn with_defaults() -> Self {
        let mut manager = Self::new();
        manager.register(Tool::Selection(SelectionTool::new()));
        manager.register(Tool::CreateWire(CreateWireTool::new()));
        manager
    }

    /// Adds a tool after every registered tool of equal or higher priority.
    pub fn register(&mut self, tool: Tool) {
        let priority = tool.priority();
        let pos = self
            .slots
            .iter()
            .position(|s| s.tool.priority() < priority)
            .unwrap_or(self.slots.len());
        for idx in &mut self.stack {
            if *idx >= pos {
                *idx += 1;
            }
        }
        self.slots.insert(pos, ToolSlot { tool, keep: false });
    }

    /// Keeps a tool active across pointer-downs even when unlocked.
    pub fn set_keep(&mut self, kind: ToolKind, keep: bool) {
        for slot in self.slots.iter_mut().filter(|s| s.tool.kind() == kind) {
            slot.keep = keep;
        }
    }

    /// Registered tools in priority order.
    pub fn kinds(&self) -> Vec<ToolKind> {
        self.slots.iter().map(|s| s.tool.kind()).collect()
    }

    pub fn tool(&self, kind: ToolKind) -> Option<&Tool> {
        self.slots.iter().map(|s| &s.tool).find(|t| t.kind() == kind)
    }

    pub fn active(&self) -> Option<ToolKind> {
        self.stack.last().map(|&idx| self.slots[idx].tool.kind())
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Routes one event. Returns the signal produced by the tool that
    /// handled it, or `None` when no tool took it.
    pub fn dispatch(&mut self, event: &PointerEvent, hit: Option<Hit>, scene: &mut Scene) -> Option<ToolSignal> {
        if event.kind == PointerEventKind::Down {
            return self.dispatch_down(event, hit, scene, true);
        }

        let idx = *self.stack.last()?;
        let signal = self.slots[idx].tool.handle(event, hit, scene);
        if signal != ToolSignal::Continue {
            self.pop(scene);
        }
        Some(signal)
    }

    fn dispatch_down(
        &mut self,
        event: &PointerEvent,
        hit: Option<Hit>,
        scene: &mut Scene,
        allow_handoff: bool,
    ) -> Option<ToolSignal> {
        if let Some(&idx) = self.stack.last() {
            let slot = &self.slots[idx];
            if slot.tool.is_unlocked() && !slot.keep {
                self.pop(scene);
            }
        }

        if self.stack.is_empty() {
            let idx = self
                .slots
                .iter()
                .position(|s| s.tool.is_valid(event, hit, scene))?;
            self.slots[idx].tool.load(scene);
            self.stack.push(idx);
            debug!("activated {} tool", self.slots[idx].tool.kind());
        }

        let idx = *self.stack.last()?;
        let signal = self.slots[idx].tool.handle(event, hit, scene);
        match signal {
            ToolSignal::Continue => {}
            ToolSignal::Restore => self.pop(scene),
            ToolSignal::Handoff => {
                self.pop(scene);
                if allow_handoff {
                    return self
                        .dispatch_down(event, hit, scene, false)
                        .or(Some(ToolSignal::Handoff));
                }
            }
        }
        Some(signal)
    }

    fn pop(&mut self, scene: &mut Scene) {
        if let Some(idx) = self.stack.pop() {
            self.slots[idx].tool.reset(scene);
            trace!("deactivated {} tool", self.slots[idx].tool.kind());
        }
    }

    /// Resets and pops every active tool.
    pub fn clear(&mut self, scene: &mut Scene) {
        while !self.stack.is_empty() {
            self.pop(scene);
        }
    }
}
