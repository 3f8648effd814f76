//! Pointer input model
//!
//! Provides:
//! - `PointerEvent`, the single event type routed to interaction tools
//! - `MouseButton` bit masks matching the host's `buttons` field
//! - `PointerTracker`, which turns raw host samples into drag/move events
//!   with per-event world deltas

use crate::geometry::Point;
use tracing::trace;

/// Pointer event kinds delivered to the tool layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// A button was pressed
    Down,
    /// The pointer moved with no button held since the last down
    Move,
    /// The pointer moved while a button is held
    Drag,
    /// A button was released over the canvas
    Up,
    /// A button was released outside the canvas
    Outside,
    /// Scroll wheel
    Wheel,
}

impl std::fmt::Display for PointerEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Down => write!(f, "down"),
            Self::Move => write!(f, "move"),
            Self::Drag => write!(f, "drag"),
            Self::Up => write!(f, "up"),
            Self::Outside => write!(f, "outside"),
            Self::Wheel => write!(f, "wheel"),
        }
    }
}

/// Button bit masks.
pub struct MouseButton;

impl MouseButton {
    pub const NONE: u8 = 0;
    pub const LEFT: u8 = 1;
    pub const RIGHT: u8 = 2;
    pub const MIDDLE: u8 = 4;
}

/// Pointer event in both device and world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Device (screen) coordinates
    pub device: Point,
    /// World coordinates
    pub world: Point,
    /// World-space movement since the previous drag sample
    pub delta: Point,
    /// Pressed-button mask
    pub buttons: u8,
    /// Wheel delta, zero for non-wheel events
    pub wheel: f64,
}

impl PointerEvent {
    /// Event with zero delta and wheel; device coordinates equal world ones.
    pub fn new(kind: PointerEventKind, world: Point, buttons: u8) -> Self {
        Self {
            kind,
            device: world,
            world,
            delta: Point::default(),
            buttons,
            wheel: 0.0,
        }
    }

    pub fn down(x: f64, y: f64, buttons: u8) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y), buttons)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y), MouseButton::NONE)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y), MouseButton::NONE)
    }

    pub fn drag(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self {
            delta: Point::new(dx, dy),
            ..Self::new(PointerEventKind::Drag, Point::new(x, y), MouseButton::LEFT)
        }
    }

    pub fn with_device(mut self, device: Point) -> Self {
        self.device = device;
        self
    }

    /// True when exactly the left button is pressed.
    pub fn is_left(&self) -> bool {
        self.buttons == MouseButton::LEFT
    }

    /// True when exactly the right button is pressed.
    pub fn is_right(&self) -> bool {
        self.buttons == MouseButton::RIGHT
    }
}

/// Builds `PointerEvent`s from raw pointer samples.
///
/// A move is reported as a drag while a button has been held since the last
/// down; the drag delta is measured from the previous drag sample.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    dragging: bool,
    buttons: u8,
    last_world: Option<Point>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Button mask from the most recent down or up.
    pub fn buttons(&self) -> u8 {
        self.buttons
    }

    pub fn pointer_down(&mut self, device: Point, world: Point, buttons: u8) -> PointerEvent {
        trace!("pointer down at ({}, {}) buttons={}", world.x, world.y, buttons);
        self.dragging = true;
        self.buttons = buttons;
        self.last_world = Some(world);
        PointerEvent::new(PointerEventKind::Down, world, buttons).with_device(device)
    }

    pub fn pointer_move(&mut self, device: Point, world: Point) -> PointerEvent {
        match (self.dragging, self.last_world) {
            (true, Some(last)) => {
                self.last_world = Some(world);
                PointerEvent {
                    delta: Point::new(world.x - last.x, world.y - last.y),
                    ..PointerEvent::new(PointerEventKind::Drag, world, self.buttons)
                        .with_device(device)
                }
            }
            _ => PointerEvent::new(PointerEventKind::Move, world, self.buttons).with_device(device),
        }
    }

    pub fn pointer_up(&mut self, device: Point, world: Point, buttons: u8) -> PointerEvent {
        trace!("pointer up at ({}, {})", world.x, world.y);
        self.buttons = buttons;
        self.dragging = false;
        self.last_world = None;
        PointerEvent::new(PointerEventKind::Up, world, buttons).with_device(device)
    }

    /// Release that happened outside the canvas.
    pub fn pointer_up_outside(&mut self, device: Point, world: Point) -> PointerEvent {
        self.dragging = false;
        self.buttons = MouseButton::NONE;
        self.last_world = None;
        PointerEvent::new(PointerEventKind::Outside, world, MouseButton::NONE).with_device(device)
    }

    pub fn wheel(&self, device: Point, world: Point, delta: f64) -> PointerEvent {
        PointerEvent {
            wheel: delta,
            ..PointerEvent::new(PointerEventKind::Wheel, world, self.buttons).with_device(device)
        }
    }
}
