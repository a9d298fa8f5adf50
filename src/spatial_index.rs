//! Spatial Index Module
//!
//! R-tree over rendered element bounds. Point queries answer "what is under
//! the pointer" and rectangle queries feed marquee selection, both in
//! O(log n) instead of a scan over every element.

use crate::geometry::{Point, Rect};
use crate::types::ElementId;
use rstar::{AABB, RTree, RTreeObject};

/// Rendered bounds of one element plus its stacking position.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub element_id: ElementId,
    /// Index in the element list; higher is drawn on top.
    pub z: usize,
    pub bounds: Rect,
}

impl SpatialEntry {
    pub fn new(element_id: ElementId, z: usize, bounds: Rect) -> Self {
        Self {
            element_id,
            z,
            bounds,
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min.x, self.bounds.min.y],
            [self.bounds.max.x, self.bounds.max.y],
        )
    }
}

/// Spatial index for diagram elements, bulk-loaded from the element list.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Entries whose bounds contain `p` (edges inclusive).
    pub fn query_point(&self, p: Point) -> Vec<SpatialEntry> {
        let envelope = AABB::from_point([p.x, p.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bounds.contains(p))
            .copied()
            .collect()
    }

    /// Entries whose bounds strictly overlap `rect`; touching edges do not count.
    pub fn query_overlapping(&self, rect: Rect) -> Vec<SpatialEntry> {
        let envelope = AABB::from_corners([rect.min.x, rect.min.y], [rect.max.x, rect.max.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bounds.overlaps(&rect))
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Replace every entry.
    pub fn rebuild<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = SpatialEntry>,
    {
        self.tree = RTree::bulk_load(entries.into_iter().collect());
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
