//! Click handling - selection, element placement, click-to-click connecting.

use crate::editor::Editor;
use crate::input::{ClickEvent, InputState};
use crate::profile_scope;
use crate::types::{ConnectionConfig, NewElement, Tool};
use tracing::debug;

impl Editor {
    pub fn handle_click(&mut self, event: &ClickEvent) {
        profile_scope!("handle_click");

        // The click that ends a drag gesture belongs to that gesture
        if std::mem::take(&mut self.click_suppressed) {
            return;
        }

        let pos = self.screen_to_diagram(event.position);
        let hit = self
            .hit_tester
            .element_at(&self.diagram, pos, self.element_scale);

        match self.tool {
            Tool::Connect => match (self.input_state, hit) {
                (InputState::AwaitingConnectionTarget { source, .. }, Some(target)) => {
                    self.input_state.reset();
                    if target == source {
                        debug!(source, "pending connection cancelled");
                    } else {
                        let _ = self.connect(source, target, ConnectionConfig::default());
                    }
                }
                (InputState::AwaitingConnectionTarget { source, .. }, None) => {
                    debug!(source, "pending connection cancelled");
                    self.input_state.reset();
                }
                (_, Some(source)) => {
                    self.input_state = InputState::AwaitingConnectionTarget {
                        source,
                        pointer: pos,
                    };
                    self.diagram.select_only(source);
                }
                (_, None) => self.diagram.clear_selection(),
            },
            Tool::Select => match hit {
                Some(id) => self.diagram.select_only(id),
                None => self.diagram.clear_selection(),
            },
            Tool::Entity | Tool::Attribute | Tool::KeyAttribute | Tool::Relationship => {
                if let Some(id) = hit {
                    self.diagram.select_only(id);
                    return;
                }
                let Some(kind) = self.tool.element_kind() else {
                    return;
                };
                let element = NewElement::centered_at(kind, pos, self.element_scale)
                    .with_font_size(self.default_font_size);
                let id = self.diagram.add_element(element);
                debug!(id, ?kind, "element placed");
                self.tool = Tool::Select;
            }
        }
    }
}
