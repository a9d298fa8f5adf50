//! Mouse down event handling - pan start, handle drag, element drag, marquee.
//!
//! ## Performance Notes
//!
//! Mouse down is a hot path during user interaction. Element hits go through
//! the R-tree in [`crate::hit_testing`]; handle hits only consider elements
//! whose handles are visible (selected or hovered).
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::editor::Editor;
use crate::input::{InputState, MouseButton, MouseDownEvent};
use crate::profile_scope;
use crate::types::{ConnectionConfig, Tool};
use tracing::debug;

impl Editor {
    pub fn handle_mouse_down(&mut self, event: &MouseDownEvent) {
        profile_scope!("handle_mouse_down");

        let wants_pan = match event.button {
            MouseButton::Middle => true,
            MouseButton::Left => self.space_held,
            MouseButton::Right => false,
        };
        if wants_pan {
            if self.input_state.is_dragging() {
                debug!(state = ?self.input_state, "pan ignored during held gesture");
                return;
            }
            self.input_state.start_panning(event.position);
            debug!(state = ?self.input_state, "panning started");
            return;
        }
        if event.button != MouseButton::Left || !self.input_state.is_idle() {
            return;
        }

        // Placement and click-to-click connecting act on click, not mouse down
        if self.tool != Tool::Select {
            return;
        }

        let pos = self.screen_to_diagram(event.position);
        let scale = self.element_scale;

        // Handles sit on the element border, so they win over the element body
        let selection = self.diagram.selection();
        let hovered = self.hovered;
        if let Some((source, handle)) = self.hit_tester.handle_at(&self.diagram, pos, scale, |id| {
            selection.contains(id) || hovered == Some(id)
        }) {
            self.input_state = InputState::DraggingConnectionFromHandle {
                source,
                handle,
                config: ConnectionConfig::default(),
                pointer: pos,
            };
            debug!(source, ?handle, "handle drag started");
            return;
        }

        profile_scope!("hit_test_elements");
        if let Some(id) = self.hit_tester.element_at(&self.diagram, pos, scale) {
            // A multi-selection drags together only when grabbed by one of its members
            if !self.diagram.selection().contains(id) {
                self.diagram.select_only(id);
            }
            let Some(element) = self.diagram.element(id) else {
                return;
            };
            self.input_state.start_dragging(id, pos - element.position());
            debug!(id, "element drag started");
            return;
        }

        self.input_state.start_marquee(pos);
    }
}
