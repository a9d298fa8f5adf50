//! The diagram model and its mutation API.
//!
//! [`Diagram`] owns elements, connections, the selection and the undo
//! history. Every state change goes through the methods here so that:
//!
//! - a pre-mutation snapshot is recorded (unless history is suppressed),
//! - referential integrity holds: deleting an element deletes every
//!   connection that references it, in the same mutation,
//! - listeners are notified exactly once per committed change.

use crate::error::{EditorError, EditorResult};
use crate::history::{History, Snapshot};
use crate::selection::Selection;
use crate::types::{
    Connection, ConnectionId, ConnectionPatch, Element, ElementId, ElementPatch, NewConnection,
    NewElement,
};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, error, trace};

/// Which parts of the diagram a committed change touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub elements: bool,
    pub connections: bool,
    pub selection: bool,
}

impl ChangeSet {
    pub const ELEMENTS: ChangeSet = ChangeSet {
        elements: true,
        connections: false,
        selection: false,
    };
    pub const CONNECTIONS: ChangeSet = ChangeSet {
        elements: false,
        connections: true,
        selection: false,
    };
    pub const SELECTION: ChangeSet = ChangeSet {
        elements: false,
        connections: false,
        selection: true,
    };
    pub const ALL: ChangeSet = ChangeSet {
        elements: true,
        connections: true,
        selection: true,
    };

    pub const fn union(self, other: ChangeSet) -> ChangeSet {
        ChangeSet {
            elements: self.elements || other.elements,
            connections: self.connections || other.connections,
            selection: self.selection || other.selection,
        }
    }

    /// True if elements or connections changed.
    pub fn touches_model(&self) -> bool {
        self.elements || self.connections
    }

    pub fn is_empty(&self) -> bool {
        !self.elements && !self.connections && !self.selection
    }
}

/// Callback invoked after every committed change.
pub type ChangeListener = Box<dyn FnMut(&Diagram, &ChangeSet)>;

pub struct Diagram {
    elements: Vec<Element>,
    connections: Vec<Connection>,
    selection: Selection,
    history: History,
    next_id: u64,
    revision: u64,
    listeners: Vec<ChangeListener>,
}

impl fmt::Debug for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagram")
            .field("elements", &self.elements.len())
            .field("connections", &self.connections.len())
            .field("selection", &self.selection)
            .field("history", &self.history.len())
            .field("next_id", &self.next_id)
            .field("revision", &self.revision)
            .finish()
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagram {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            connections: Vec::new(),
            selection: Selection::new(),
            history: History::new(),
            next_id: 1,
            revision: 0,
            listeners: Vec::new(),
        }
    }

    /// Build a diagram from previously persisted records without touching history.
    ///
    /// The caller is responsible for the records being consistent; loaded
    /// payloads are checked by [`crate::persistence::DiagramFile::from_json`].
    pub fn from_parts(elements: Vec<Element>, connections: Vec<Connection>) -> Self {
        let next_id = next_free_id(&elements, &connections);
        Self {
            elements,
            connections,
            next_id,
            ..Self::new()
        }
    }

    // ==================== Read Accessors ====================

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|conn| conn.id == id)
    }

    pub fn contains_element(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Selected elements in selection order.
    pub fn selected_elements(&self) -> Vec<&Element> {
        self.selection
            .iter()
            .filter_map(|id| self.element(id))
            .collect()
    }

    /// Monotonic counter bumped whenever elements or connections change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.connections.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            elements: self.elements.clone(),
            connections: self.connections.clone(),
        }
    }

    // ==================== Change Notification ====================

    /// Register a listener called after every committed change.
    pub fn subscribe(&mut self, listener: impl FnMut(&Diagram, &ChangeSet) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, changes: ChangeSet) {
        if changes.is_empty() {
            return;
        }
        if changes.touches_model() {
            self.revision += 1;
        }
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            listener(self, &changes);
        }
        self.listeners = listeners;
    }

    // ==================== History ====================

    /// Capture the current state onto the undo stack.
    ///
    /// Does nothing inside [`Diagram::with_history_suppressed`].
    pub fn record(&mut self) -> bool {
        if self.history.is_suppressed() {
            trace!("history suppressed, snapshot skipped");
            return false;
        }
        let snapshot = self.snapshot();
        self.history.record(snapshot)
    }

    /// Run `f` with history recording disabled; nested `record` calls are no-ops.
    pub fn with_history_suppressed<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.history.suppress();
        let result = f(self);
        self.history.resume();
        result
    }

    pub fn is_history_suppressed(&self) -> bool {
        self.history.is_suppressed()
    }

    /// Restore the most recent snapshot and clear the selection.
    ///
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            debug!("undo: history empty");
            return false;
        };
        self.with_history_suppressed(|diagram| {
            diagram.elements = snapshot.elements;
            diagram.connections = snapshot.connections;
            diagram.selection.clear();
            diagram.notify(ChangeSet::ALL);
        });
        debug!(remaining = self.history.len(), "undo applied");
        true
    }

    // ==================== Elements ====================

    pub(crate) fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        // Payload ids are capped at MAX_ID, so exhaustion needs ~2^64 allocations
        self.next_id = id.checked_add(1).unwrap_or_else(|| {
            error!("element id counter exhausted");
            id
        });
        id
    }

    fn element_index(&self, id: ElementId) -> EditorResult<usize> {
        self.elements
            .iter()
            .position(|el| el.id == id)
            .ok_or(EditorError::UnknownElement(id))
    }

    /// Append a new element and return its freshly assigned id.
    pub fn add_element(&mut self, element: NewElement) -> ElementId {
        self.record();
        let id = self.allocate_id();
        self.elements.push(element.into_element(id));
        debug!(id, "element added");
        self.notify(ChangeSet::ELEMENTS);
        id
    }

    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> EditorResult<()> {
        let index = self.element_index(id)?;
        self.record();
        patch.apply(&mut self.elements[index]);
        self.notify(ChangeSet::ELEMENTS);
        Ok(())
    }

    /// Apply several patches as one mutation.
    ///
    /// Either every id exists and all patches apply, or nothing changes.
    pub fn update_elements(&mut self, updates: &[(ElementId, ElementPatch)]) -> EditorResult<()> {
        if updates.is_empty() {
            return Ok(());
        }
        let indices = updates
            .iter()
            .map(|(id, _)| self.element_index(*id))
            .collect::<EditorResult<Vec<_>>>()?;

        self.record();
        for (index, (_, patch)) in indices.into_iter().zip(updates) {
            patch.apply(&mut self.elements[index]);
        }
        self.notify(ChangeSet::ELEMENTS);
        Ok(())
    }

    pub fn delete_element(&mut self, id: ElementId) -> bool {
        self.delete_elements(&[id]) == 1
    }

    /// Delete elements together with every connection that references them.
    ///
    /// Unknown ids are ignored. Returns the number of elements removed.
    pub fn delete_elements(&mut self, ids: &[ElementId]) -> usize {
        let doomed: HashSet<ElementId> = ids
            .iter()
            .copied()
            .filter(|id| self.contains_element(*id))
            .collect();
        if doomed.is_empty() {
            return 0;
        }

        self.record();
        self.elements.retain(|el| !doomed.contains(&el.id));
        let connections_before = self.connections.len();
        self.connections
            .retain(|conn| !doomed.contains(&conn.from) && !doomed.contains(&conn.to));
        let selection_changed = self.selection.remove_all(&doomed);

        let changes = ChangeSet {
            elements: true,
            connections: self.connections.len() != connections_before,
            selection: selection_changed,
        };
        debug!(
            removed = doomed.len(),
            cascaded = connections_before - self.connections.len(),
            "elements deleted"
        );
        self.notify(changes);
        doomed.len()
    }

    // ==================== Connections ====================

    fn connection_index(&self, id: ConnectionId) -> EditorResult<usize> {
        self.connections
            .iter()
            .position(|conn| conn.id == id)
            .ok_or(EditorError::UnknownConnection(id))
    }

    /// Append a connection between two existing, distinct elements.
    ///
    /// Type rules are not checked here; see [`crate::validation`].
    pub fn add_connection(&mut self, connection: NewConnection) -> EditorResult<ConnectionId> {
        if connection.from == connection.to {
            return Err(EditorError::SelfConnection(connection.from));
        }
        for endpoint in [connection.from, connection.to] {
            if !self.contains_element(endpoint) {
                return Err(EditorError::UnknownElement(endpoint));
            }
        }

        self.record();
        let id = self.allocate_id();
        self.connections.push(connection.into_connection(id));
        debug!(id, from = connection.from, to = connection.to, "connection added");
        self.notify(ChangeSet::CONNECTIONS);
        Ok(id)
    }

    pub fn update_connection(
        &mut self,
        id: ConnectionId,
        patch: &ConnectionPatch,
    ) -> EditorResult<()> {
        let index = self.connection_index(id)?;
        self.record();
        patch.apply(&mut self.connections[index]);
        self.notify(ChangeSet::CONNECTIONS);
        Ok(())
    }

    pub fn delete_connection(&mut self, id: ConnectionId) -> bool {
        let Ok(index) = self.connection_index(id) else {
            return false;
        };
        self.record();
        self.connections.remove(index);
        self.notify(ChangeSet::CONNECTIONS);
        true
    }

    // ==================== Whole-Model Operations ====================

    /// Remove every element, connection and the selection.
    pub fn clear(&mut self) -> bool {
        if self.is_empty() && self.selection.is_empty() {
            return false;
        }
        self.record();
        self.elements.clear();
        self.connections.clear();
        self.selection.clear();
        debug!("diagram cleared");
        self.notify(ChangeSet::ALL);
        true
    }

    /// Replace the model wholesale (import). Records one history entry.
    pub fn replace_all(&mut self, elements: Vec<Element>, connections: Vec<Connection>) {
        self.record();
        self.next_id = self.next_id.max(next_free_id(&elements, &connections));
        self.elements = elements;
        self.connections = connections;
        self.selection.clear();
        self.notify(ChangeSet::ALL);
    }

    /// Append already-identified records and select the new elements.
    ///
    /// Records one history entry for the whole batch. Ids must come from
    /// [`Diagram::allocate_id`].
    pub(crate) fn insert_and_select(
        &mut self,
        elements: Vec<Element>,
        connections: Vec<Connection>,
    ) -> Vec<ElementId> {
        self.record();
        let ids: Vec<ElementId> = elements.iter().map(|el| el.id).collect();
        self.elements.extend(elements);
        self.connections.extend(connections);
        self.selection.replace(ids.iter().copied());
        self.notify(ChangeSet::ALL);
        ids
    }

    // ==================== Selection ====================

    /// Replace the selection; ids that do not exist are dropped.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        let existing: Vec<ElementId> = ids
            .into_iter()
            .filter(|id| self.contains_element(*id))
            .collect();
        if self.selection.replace(existing) {
            self.notify(ChangeSet::SELECTION);
        }
    }

    pub fn select_only(&mut self, id: ElementId) {
        if self.contains_element(id) && self.selection.select_only(id) {
            self.notify(ChangeSet::SELECTION);
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.notify(ChangeSet::SELECTION);
        }
    }
}

/// First id above every id already present.
fn next_free_id(elements: &[Element], connections: &[Connection]) -> u64 {
    elements
        .iter()
        .map(|el| el.id)
        .chain(connections.iter().map(|conn| conn.id))
        .max()
        .map_or(1, |max| max.saturating_add(1))
}
