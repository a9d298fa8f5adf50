//! Raster export parameters.
//!
//! The engine does not rasterize. It computes which region of the diagram to
//! capture and at what pixel ratio; an export collaborator does the drawing.
//! Nothing here mutates the model.

use crate::constants::EXPORT_PADDING;
use crate::geometry::{Rect, point};
use crate::types::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportQuality {
    #[default]
    High,
    Average,
    Low,
}

impl ExportQuality {
    /// Pixel ratio of the exported image.
    pub fn scale(self) -> f32 {
        match self {
            ExportQuality::High => 3.0,
            ExportQuality::Average => 2.0,
            ExportQuality::Low => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportRequest {
    /// Diagram-space region to capture; `None` for an empty diagram
    pub region: Option<Rect>,
    pub scale: f32,
}

impl ExportRequest {
    /// Bounding box of the rendered elements padded on every side.
    ///
    /// The padding is clipped at the diagram origin; width and height shrink
    /// by the clipped amount so the far edges keep their full padding.
    pub fn for_elements(elements: &[Element], element_scale: f32, quality: ExportQuality) -> Self {
        let region = elements
            .iter()
            .map(|el| el.bounds(element_scale))
            .reduce(|a, b| a.union(&b))
            .map(|bounds| {
                let (x, width) = pad_axis(bounds.min.x, bounds.max.x);
                let (y, height) = pad_axis(bounds.min.y, bounds.max.y);
                Rect::from_origin_size(point(x, y), width, height)
            });
        Self {
            region,
            scale: quality.scale(),
        }
    }

    /// Output image size in pixels.
    pub fn pixel_size(&self) -> Option<(u32, u32)> {
        self.region.map(|r| {
            (
                (r.width() * self.scale).round() as u32,
                (r.height() * self.scale).round() as u32,
            )
        })
    }
}

fn pad_axis(min: f32, max: f32) -> (f32, f32) {
    let start = min - EXPORT_PADDING;
    let clipped = (-start).max(0.0);
    (start.max(0.0), (max - min) + EXPORT_PADDING * 2.0 - clipped)
}
