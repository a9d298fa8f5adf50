//! Coordinate conversion between device pixels and diagram space.
//!
//! The canvas sits inside a scrollable viewport. Its on-screen origin is the
//! viewport origin minus the scroll offset, and its content is scaled by the
//! zoom factor, so `diagram = (device - canvas_origin) / zoom`.

use crate::constants::DEFAULT_ZOOM;
use crate::geometry::{Point, point};

/// Context needed for coordinate conversions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateContext {
    /// Device position of the diagram origin
    pub canvas_origin: Point,
    pub zoom: f32,
}

impl CoordinateContext {
    #[inline]
    pub fn new(canvas_origin: Point, zoom: f32) -> Self {
        Self {
            canvas_origin,
            zoom,
        }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert a device position to diagram space
    #[inline]
    pub fn screen_to_canvas(screen_pos: Point, ctx: &CoordinateContext) -> Point {
        point(
            (screen_pos.x - ctx.canvas_origin.x) / ctx.zoom,
            (screen_pos.y - ctx.canvas_origin.y) / ctx.zoom,
        )
    }

    /// Convert a diagram position to device pixels
    #[inline]
    pub fn canvas_to_screen(canvas_pos: Point, ctx: &CoordinateContext) -> Point {
        point(
            canvas_pos.x * ctx.zoom + ctx.canvas_origin.x,
            canvas_pos.y * ctx.zoom + ctx.canvas_origin.y,
        )
    }
}

/// Scroll position and zoom of the viewport hosting the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Device position of the viewport's top-left corner
    pub origin: Point,
    /// Scroll offset in device pixels; never negative
    pub scroll: Point,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            scroll: Point::ZERO,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Viewport {
    pub fn context(&self) -> CoordinateContext {
        CoordinateContext::new(self.origin - self.scroll, self.zoom)
    }

    /// Scroll by a pointer delta: dragging right reveals content to the left.
    pub fn pan_by(&mut self, delta: Point) {
        self.scroll = point(
            (self.scroll.x - delta.x).max(0.0),
            (self.scroll.y - delta.y).max(0.0),
        );
    }
}
