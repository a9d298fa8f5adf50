//! Viewport transformations - zoom, scroll, coordinate conversion.

use crate::constants::{BUTTON_ZOOM_STEP, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
use crate::editor::Editor;
use crate::geometry::Point;
use crate::input::ScrollWheelEvent;
use crate::input::coords::CoordinateConverter;
use tracing::trace;

impl Editor {
    /// Convert a device position to diagram space.
    pub fn screen_to_diagram(&self, pos: Point) -> Point {
        CoordinateConverter::screen_to_canvas(pos, &self.viewport.context())
    }

    /// Convert a diagram position to device pixels.
    pub fn diagram_to_screen(&self, pos: Point) -> Point {
        CoordinateConverter::canvas_to_screen(pos, &self.viewport.context())
    }

    /// Ctrl/Cmd + wheel zooms; plain wheel is left to the hosting viewport.
    ///
    /// Returns true if the event changed the zoom.
    pub fn handle_scroll(&mut self, event: &ScrollWheelEvent) -> bool {
        if !event.modifiers.secondary() || event.delta.y == 0.0 {
            return false;
        }
        let step = if event.delta.y < 0.0 {
            self.wheel_zoom_step
        } else {
            -self.wheel_zoom_step
        };
        self.set_zoom(self.viewport.zoom + step)
    }

    /// Set the zoom level, clamped to the supported range.
    ///
    /// Returns true if the zoom changed.
    pub fn set_zoom(&mut self, zoom: f32) -> bool {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if zoom == self.viewport.zoom {
            return false;
        }
        self.viewport.zoom = zoom;
        trace!(zoom, "zoom changed");
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.viewport.zoom + BUTTON_ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.viewport.zoom - BUTTON_ZOOM_STEP)
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.set_zoom(DEFAULT_ZOOM)
    }

    /// Device position of the viewport's top-left corner.
    pub fn set_viewport_origin(&mut self, origin: Point) {
        self.viewport.origin = origin;
    }

    /// Scroll offset of the viewport, as reported by the host.
    pub fn set_scroll(&mut self, scroll: Point) {
        self.viewport.scroll = Point::new(scroll.x.max(0.0), scroll.y.max(0.0));
    }

    pub fn scroll(&self) -> Point {
        self.viewport.scroll
    }
}
