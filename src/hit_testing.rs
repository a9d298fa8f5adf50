//! Hit testing against rendered element bounds.
//!
//! [`HitTester`] keeps a [`SpatialIndex`] that is rebuilt lazily whenever the
//! diagram revision or element scale differs from what was last indexed.

use crate::constants::HANDLE_SIZE;
use crate::diagram::Diagram;
use crate::geometry::{Handle, Point, Rect};
use crate::profile_scope;
use crate::spatial_index::{SpatialEntry, SpatialIndex};
use crate::types::ElementId;
use tracing::trace;

#[derive(Default)]
pub struct HitTester {
    index: SpatialIndex,
    /// Diagram revision and scale bits the index was built from.
    indexed: Option<(u64, u32)>,
}

impl HitTester {
    pub fn new() -> Self {
        Self::default()
    }

    fn refresh(&mut self, diagram: &Diagram, element_scale: f32) {
        let key = (diagram.revision(), element_scale.to_bits());
        if self.indexed == Some(key) {
            return;
        }
        profile_scope!("hit_index_rebuild");
        self.index.rebuild(
            diagram
                .elements()
                .iter()
                .enumerate()
                .map(|(z, el)| SpatialEntry::new(el.id, z, el.bounds(element_scale))),
        );
        self.indexed = Some(key);
        trace!(entries = self.index.len(), "hit index rebuilt");
    }

    /// Topmost element whose rendered bounds contain `pos`.
    pub fn element_at(
        &mut self,
        diagram: &Diagram,
        pos: Point,
        element_scale: f32,
    ) -> Option<ElementId> {
        self.refresh(diagram, element_scale);
        self.index
            .query_point(pos)
            .into_iter()
            .max_by_key(|entry| entry.z)
            .map(|entry| entry.element_id)
    }

    /// Elements whose rendered bounds strictly overlap `rect`, in stacking order.
    pub fn elements_overlapping(
        &mut self,
        diagram: &Diagram,
        rect: Rect,
        element_scale: f32,
    ) -> Vec<ElementId> {
        self.refresh(diagram, element_scale);
        let mut hits = self.index.query_overlapping(rect);
        hits.sort_by_key(|entry| entry.z);
        hits.into_iter().map(|entry| entry.element_id).collect()
    }

    /// Connection handle under `pos`, restricted to elements accepted by `filter`.
    ///
    /// Elements are checked topmost first so overlapping handles resolve the
    /// same way element hits do.
    pub fn handle_at(
        &mut self,
        diagram: &Diagram,
        pos: Point,
        element_scale: f32,
        filter: impl Fn(ElementId) -> bool,
    ) -> Option<(ElementId, Handle)> {
        diagram
            .elements()
            .iter()
            .rev()
            .filter(|el| filter(el.id))
            .find_map(|el| {
                let bounds = el.bounds(element_scale);
                Handle::ALL
                    .into_iter()
                    .find(|handle| Rect::around(handle.anchor(bounds), HANDLE_SIZE).contains(pos))
                    .map(|handle| (el.id, handle))
            })
    }
}
