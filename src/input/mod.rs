//! Pointer, wheel and keyboard handling for the diagram canvas.
//!
//! This module implements all interaction logic: selection, element
//! dragging, marquee selection, connection gestures, placement tools,
//! panning and zoom.
//!
//! ## Architecture
//!
//! The input system uses an explicit state machine (`InputState`) to track
//! the current interaction mode. Events arrive in device pixels and are
//! converted to diagram space through [`coords::CoordinateConverter`] before
//! any hit test or mutation.
//!
//! A click is delivered separately from the mouse-up that precedes it, the
//! way a browser or toolkit reports them. Gestures that end with a real drag
//! (moved element, completed marquee, handle drag) swallow the following
//! click so it cannot undo what the gesture just did.
//!
//! ## Modules
//!
//! - `state` - Input state machine enum and helper methods
//! - `coords` - Device/diagram coordinate conversion and the viewport
//! - `mouse_down` - Mouse down handling (handle drag, element drag, marquee, pan start)
//! - `drag` - Mouse move handling (drag, marquee, rubber band, pan)
//! - `mouse_up` - Mouse up handling (finalize marquee and handle connections)
//! - `click` - Click handling (selection, placement, click-to-click connect)
//! - `keyboard` - Shortcuts and the space-to-pan modifier
//! - `transform` - Zoom and viewport scrolling

pub mod coords;
mod state;
mod mouse_down;
mod drag;
mod mouse_up;
mod click;
mod keyboard;
mod transform;

pub use state::InputState;

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Keyboard modifiers held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    /// Command on macOS, Super elsewhere
    pub platform: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn command() -> Self {
        Self {
            control: true,
            ..Self::default()
        }
    }

    /// Ctrl or Cmd, whichever the platform uses for shortcuts.
    pub fn secondary(&self) -> bool {
        self.control || self.platform
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseDownEvent {
    pub position: Point,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseUpEvent {
    pub position: Point,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    pub position: Point,
    pub modifiers: Modifiers,
}

/// Primary-button click, delivered after the matching mouse up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub position: Point,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollWheelEvent {
    pub position: Point,
    /// Pixel delta; negative `y` scrolls up.
    pub delta: Point,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Space,
    Escape,
    Character(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDownEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Auto-repeat from a held key
    pub is_held: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUpEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl MouseDownEvent {
    pub fn left(position: Point) -> Self {
        Self {
            position,
            button: MouseButton::Left,
            modifiers: Modifiers::none(),
        }
    }

    pub fn middle(position: Point) -> Self {
        Self {
            button: MouseButton::Middle,
            ..Self::left(position)
        }
    }
}

impl MouseUpEvent {
    pub fn left(position: Point) -> Self {
        Self {
            position,
            button: MouseButton::Left,
            modifiers: Modifiers::none(),
        }
    }

    pub fn middle(position: Point) -> Self {
        Self {
            button: MouseButton::Middle,
            ..Self::left(position)
        }
    }
}

impl MouseMoveEvent {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            modifiers: Modifiers::none(),
        }
    }
}

impl ClickEvent {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            modifiers: Modifiers::none(),
        }
    }
}

impl KeyDownEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::none(),
            is_held: false,
        }
    }

    /// `key` pressed together with Ctrl/Cmd.
    pub fn shortcut(key: char) -> Self {
        Self {
            key: Key::Character(key),
            modifiers: Modifiers::command(),
            is_held: false,
        }
    }
}

impl KeyUpEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::none(),
        }
    }
}
