//! Selection set for diagram elements.
//!
//! Ids are kept unique and iterate in id order, which is also creation
//! order, so callers get a deterministic sequence without tracking insertion.

use crate::types::ElementId;
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.iter().collect()
    }

    /// Returns true if the id was not already selected.
    pub fn insert(&mut self, id: ElementId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: ElementId) -> bool {
        self.ids.remove(&id)
    }

    /// Remove every id in `ids`. Returns true if anything was removed.
    pub fn remove_all(&mut self, ids: &HashSet<ElementId>) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| !ids.contains(id));
        self.ids.len() != before
    }

    /// Returns true if the selection was non-empty.
    pub fn clear(&mut self) -> bool {
        let changed = !self.ids.is_empty();
        self.ids.clear();
        changed
    }

    /// Replace the selection with a single id. Returns true if it changed.
    pub fn select_only(&mut self, id: ElementId) -> bool {
        if self.ids.len() == 1 && self.ids.contains(&id) {
            return false;
        }
        self.ids.clear();
        self.ids.insert(id);
        true
    }

    /// Replace the whole selection. Returns true if it changed.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = ElementId>) -> bool {
        let next: BTreeSet<ElementId> = ids.into_iter().collect();
        if next == self.ids {
            return false;
        }
        self.ids = next;
        true
    }
}

impl FromIterator<ElementId> for Selection {
    fn from_iter<I: IntoIterator<Item = ElementId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
