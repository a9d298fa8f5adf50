//! Mouse move handling - element dragging, marquee, rubber band, panning.
//!
//! ## Performance Notes
//!
//! Mouse move fires at pointer rate during a drag. Group moves are applied as
//! one batch update so the whole selection shifts by exactly the same delta.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::editor::Editor;
use crate::input::{InputState, MouseMoveEvent};
use crate::profile_scope;
use crate::types::{ElementId, ElementPatch};
use tracing::warn;

impl Editor {
    pub fn handle_mouse_move(&mut self, event: &MouseMoveEvent) {
        profile_scope!("handle_mouse_move");

        if let InputState::Panning { last_pos, .. } = self.input_state {
            self.viewport.pan_by(event.position - last_pos);
            self.input_state.start_panning(event.position);
            return;
        }

        let pos = self.screen_to_diagram(event.position);
        self.hovered = self
            .hit_tester
            .element_at(&self.diagram, pos, self.element_scale);

        match self.input_state {
            InputState::DraggingElement {
                primary,
                grab_offset,
                moved,
            } => {
                let Some(element) = self.diagram.element(primary) else {
                    self.input_state.reset();
                    return;
                };
                let delta = (pos - grab_offset) - element.position();
                if delta.is_zero() {
                    return;
                }

                let members: Vec<ElementId> = if self.diagram.selection().contains(primary) {
                    self.diagram.selection().ids()
                } else {
                    vec![primary]
                };
                let updates: Vec<(ElementId, ElementPatch)> = members
                    .into_iter()
                    .filter_map(|id| self.diagram.element(id))
                    .map(|el| (el.id, ElementPatch::position(el.x + delta.x, el.y + delta.y)))
                    .collect();

                // One history entry per gesture, taken before the first move
                if !moved {
                    self.diagram.record();
                    self.input_state = InputState::DraggingElement {
                        primary,
                        grab_offset,
                        moved: true,
                    };
                }
                let result = self
                    .diagram
                    .with_history_suppressed(|diagram| diagram.update_elements(&updates));
                if let Err(e) = result {
                    warn!("drag update failed: {}", e);
                }
            }
            InputState::MarqueeSelecting { .. }
            | InputState::AwaitingConnectionTarget { .. }
            | InputState::DraggingConnectionFromHandle { .. } => {
                self.input_state.set_pointer(pos);
            }
            InputState::Idle | InputState::Panning { .. } => {}
        }
    }
}
