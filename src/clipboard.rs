//! Copy and paste of element subsets.
//!
//! The clipboard is owned by the editor, not the OS. A copy captures the
//! selected elements plus only the connections whose both endpoints are
//! selected; a paste re-identifies everything and offsets it.

use crate::constants::PASTE_OFFSET;
use crate::diagram::Diagram;
use crate::selection::Selection;
use crate::types::{Connection, Element, ElementId};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipboardPayload {
    pub elements: Vec<Element>,
    pub connections: Vec<Connection>,
}

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    payload: Option<ClipboardPayload>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    pub fn payload(&self) -> Option<&ClipboardPayload> {
        self.payload.as_ref()
    }

    pub fn clear(&mut self) {
        self.payload = None;
    }

    /// Capture the selected subset. An empty selection leaves the clipboard untouched.
    pub fn copy(&mut self, diagram: &Diagram, selection: &Selection) -> bool {
        let elements: Vec<Element> = diagram
            .elements()
            .iter()
            .filter(|el| selection.contains(el.id))
            .cloned()
            .collect();
        if elements.is_empty() {
            return false;
        }

        let connections: Vec<Connection> = diagram
            .connections()
            .iter()
            .filter(|conn| selection.contains(conn.from) && selection.contains(conn.to))
            .cloned()
            .collect();

        debug!(
            elements = elements.len(),
            connections = connections.len(),
            "copied to clipboard"
        );
        self.payload = Some(ClipboardPayload {
            elements,
            connections,
        });
        true
    }

    /// Insert a fresh copy of the payload and select it.
    ///
    /// Returns the new element ids, or `None` when the clipboard is empty.
    /// The payload stays in place, so repeated pastes produce independent copies.
    pub fn paste(&self, diagram: &mut Diagram) -> Option<Vec<ElementId>> {
        let payload = self.payload.as_ref()?;
        let (dx, dy) = PASTE_OFFSET;

        let mut remap: HashMap<ElementId, ElementId> = HashMap::new();
        let elements: Vec<Element> = payload
            .elements
            .iter()
            .map(|el| {
                let id = diagram.allocate_id();
                remap.insert(el.id, id);
                Element {
                    id,
                    x: el.x + dx,
                    y: el.y + dy,
                    ..el.clone()
                }
            })
            .collect();

        let connections: Vec<Connection> = payload
            .connections
            .iter()
            .filter_map(|conn| {
                Some(Connection {
                    id: diagram.allocate_id(),
                    from: *remap.get(&conn.from)?,
                    to: *remap.get(&conn.to)?,
                    ..conn.clone()
                })
            })
            .collect();

        let ids = diagram.insert_and_select(elements, connections);
        debug!(pasted = ids.len(), "pasted from clipboard");
        Some(ids)
    }
}
