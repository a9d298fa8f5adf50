//! Keyboard shortcuts and the space-to-pan modifier.
//!
//! Every diagram-level shortcut is ignored while a text field has focus so
//! typing into a label never deletes or pastes elements.

use crate::editor::Editor;
use crate::input::{InputState, Key, KeyDownEvent, KeyUpEvent};
use tracing::debug;

impl Editor {
    /// Returns true if the event was consumed.
    pub fn handle_key_down(&mut self, event: &KeyDownEvent) -> bool {
        if self.text_focus {
            return false;
        }

        match event.key {
            Key::Space => {
                if !event.is_held {
                    self.space_held = true;
                }
                true
            }
            Key::Delete | Key::Backspace => {
                self.delete_selection();
                true
            }
            Key::Escape => {
                self.cancel_gesture();
                true
            }
            Key::Character(c) if event.modifiers.secondary() => {
                match c.to_ascii_lowercase() {
                    'z' if !event.modifiers.shift => {
                        self.undo();
                    }
                    'c' => {
                        self.copy_selection();
                    }
                    'v' => {
                        self.paste();
                    }
                    _ => return false,
                }
                true
            }
            Key::Character(_) => false,
        }
    }

    pub fn handle_key_up(&mut self, event: &KeyUpEvent) {
        if event.key == Key::Space {
            self.space_held = false;
            if let InputState::Panning { last_pos, .. } = self.input_state {
                let pointer = self.screen_to_diagram(last_pos);
                self.input_state.finish_panning(pointer);
                debug!("panning stopped");
            }
        }
    }
}
