//! Mouse up event handling - finalize marquee selection and handle connections.

use crate::constants::MIN_MARQUEE_SIZE;
use crate::editor::Editor;
use crate::geometry::Rect;
use crate::input::{InputState, MouseUpEvent};
use crate::profile_scope;
use tracing::debug;

impl Editor {
    pub fn handle_mouse_up(&mut self, event: &MouseUpEvent) {
        profile_scope!("handle_mouse_up");

        let pos = self.screen_to_diagram(event.position);

        match self.input_state.take() {
            InputState::DraggingElement { moved, .. } => {
                if moved {
                    self.click_suppressed = true;
                }
            }
            InputState::MarqueeSelecting { start, .. } => {
                let rect = Rect::from_corners(start, pos);
                // Threshold is in device pixels, the rectangle in diagram space
                let zoom = self.viewport.zoom;
                if rect.width() * zoom > MIN_MARQUEE_SIZE || rect.height() * zoom > MIN_MARQUEE_SIZE {
                    let hits =
                        self.hit_tester
                            .elements_overlapping(&self.diagram, rect, self.element_scale);
                    debug!(selected = hits.len(), "marquee selection");
                    self.diagram.set_selection(hits);
                    self.click_suppressed = true;
                } else {
                    self.diagram.clear_selection();
                }
            }
            InputState::DraggingConnectionFromHandle { source, config, .. } => {
                let target = self
                    .hit_tester
                    .element_at(&self.diagram, pos, self.element_scale);
                match target {
                    Some(target) if target != source => {
                        // Rejections surface as toasts inside `connect`
                        let _ = self.connect(source, target, config);
                    }
                    _ => debug!(source, "handle drag released without target"),
                }
                self.click_suppressed = true;
            }
            // Still waiting for the second click
            pending @ InputState::AwaitingConnectionTarget { .. } => {
                self.input_state = pending;
            }
            panning @ InputState::Panning { .. } => {
                self.input_state = panning;
                self.input_state.finish_panning(pos);
                debug!("panning stopped");
            }
            InputState::Idle => {}
        }
    }
}
