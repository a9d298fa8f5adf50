//! Input state machine - unified state management for all pointer interactions.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Panning                       (middle mouse down, or space + left down)
//! AwaitingConnectionTarget -> Panning   (same; the source is parked and restored on pan end)
//! Idle -> DraggingElement               (left down on an element, select tool)
//! Idle -> MarqueeSelecting              (left down on empty canvas, select tool)
//! Idle -> DraggingConnectionFromHandle  (left down on a visible handle, select tool)
//! Idle -> AwaitingConnectionTarget      (click on an element, connect tool)
//!
//! AwaitingConnectionTarget -> Idle      (click on a target, same element, empty canvas, or Escape)
//! Any other state -> Idle               (mouse up, or Escape)
//! ```
//!
//! Positions stored in gesture states are in diagram space, except
//! `Panning::last_pos` which tracks raw device pixels.

use crate::geometry::{Handle, Point, Rect};
use crate::types::{ConnectionConfig, ElementId};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No active gesture
    #[default]
    Idle,

    /// Viewport panning (middle mouse or space+drag)
    Panning {
        /// Last pointer position in device pixels
        last_pos: Point,
        /// Click-to-click source to return to when the pan ends
        resume_connection: Option<ElementId>,
    },

    /// Dragging an element, plus the rest of the selection if it belongs to it
    DraggingElement {
        /// Element under the pointer at mouse down
        primary: ElementId,
        /// Pointer position relative to the element's top-left corner
        grab_offset: Point,
        /// Whether the gesture has moved anything yet
        moved: bool,
    },

    /// Marquee selection
    MarqueeSelecting { start: Point, current: Point },

    /// Click-to-click connecting: source chosen, waiting for the target click
    AwaitingConnectionTarget { source: ElementId, pointer: Point },

    /// Dragging a rubber band out of one of an element's handles
    DraggingConnectionFromHandle {
        source: ElementId,
        handle: Handle,
        /// Live configuration, adjustable while dragging
        config: ConnectionConfig,
        pointer: Point,
    },
}

impl InputState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if a button is held as part of the gesture
    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            Self::Panning { .. }
                | Self::DraggingElement { .. }
                | Self::MarqueeSelecting { .. }
                | Self::DraggingConnectionFromHandle { .. }
        )
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    pub fn is_marquee_selecting(&self) -> bool {
        matches!(self, Self::MarqueeSelecting { .. })
    }

    /// Returns true for either connection gesture
    pub fn is_connecting(&self) -> bool {
        matches!(
            self,
            Self::AwaitingConnectionTarget { .. } | Self::DraggingConnectionFromHandle { .. }
        )
    }

    /// Get the element being dragged, if any
    pub fn dragged_element(&self) -> Option<ElementId> {
        match self {
            Self::DraggingElement { primary, .. } => Some(*primary),
            _ => None,
        }
    }

    /// Source element of a pending connection
    pub fn connection_source(&self) -> Option<ElementId> {
        match self {
            Self::AwaitingConnectionTarget { source, .. }
            | Self::DraggingConnectionFromHandle { source, .. } => Some(*source),
            _ => None,
        }
    }

    /// Current marquee rectangle in diagram space
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self {
            Self::MarqueeSelecting { start, current } => Some(Rect::from_corners(*start, *current)),
            _ => None,
        }
    }

    /// Live configuration of a handle drag
    pub fn live_config(&self) -> Option<ConnectionConfig> {
        match self {
            Self::DraggingConnectionFromHandle { config, .. } => Some(*config),
            _ => None,
        }
    }

    /// Replace the live configuration. Returns false outside a handle drag.
    pub fn set_live_config(&mut self, new_config: ConnectionConfig) -> bool {
        match self {
            Self::DraggingConnectionFromHandle { config, .. } => {
                *config = new_config;
                true
            }
            _ => false,
        }
    }

    /// Track the pointer for marquee and rubber-band states
    pub fn set_pointer(&mut self, pos: Point) {
        match self {
            Self::MarqueeSelecting { current, .. } => *current = pos,
            Self::AwaitingConnectionTarget { pointer, .. }
            | Self::DraggingConnectionFromHandle { pointer, .. } => *pointer = pos,
            _ => {}
        }
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// Take the current state, leaving Idle behind
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    pub fn start_marquee(&mut self, start: Point) {
        *self = Self::MarqueeSelecting {
            start,
            current: start,
        };
    }

    pub fn start_dragging(&mut self, primary: ElementId, grab_offset: Point) {
        *self = Self::DraggingElement {
            primary,
            grab_offset,
            moved: false,
        };
    }

    /// Start or continue panning. A pending click-to-click connection is
    /// parked until [`finish_panning`](Self::finish_panning).
    pub fn start_panning(&mut self, last_pos: Point) {
        let resume_connection = match *self {
            Self::AwaitingConnectionTarget { source, .. } => Some(source),
            Self::Panning {
                resume_connection, ..
            } => resume_connection,
            _ => None,
        };
        *self = Self::Panning {
            last_pos,
            resume_connection,
        };
    }

    /// End a pan, returning to the parked connection if there is one.
    pub fn finish_panning(&mut self, pointer: Point) {
        *self = match *self {
            Self::Panning {
                resume_connection: Some(source),
                ..
            } => Self::AwaitingConnectionTarget { source, pointer },
            _ => Self::Idle,
        };
    }
}
