//! Plain geometry used by the model and the input system.
//!
//! All values are `f32` in whichever space the caller is working in; the
//! conversion between device pixels and diagram space lives in
//! [`crate::input::coords`].

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Sub};

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Shorthand constructor for [`Point`].
#[inline]
pub const fn point(x: f32, y: f32) -> Point {
    Point { x, y }
}

impl Point {
    pub const ZERO: Point = point(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        point(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        point(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Div<f32> for Point {
    type Output = Point;

    fn div(self, rhs: f32) -> Point {
        point(self.x / rhs, self.y / rhs)
    }
}

/// Axis-aligned rectangle stored as normalized min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Build a rectangle from any two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: point(a.x.min(b.x), a.y.min(b.y)),
            max: point(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_origin_size(origin: Point, width: f32, height: f32) -> Self {
        Self::from_corners(origin, point(origin.x + width, origin.y + height))
    }

    /// Square of side `size` centered on `center`.
    pub fn around(center: Point, size: f32) -> Self {
        let half = size / 2.0;
        Self::from_corners(
            point(center.x - half, center.y - half),
            point(center.x + half, center.y + half),
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        point(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Closed containment test (edges count as inside).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Open-interval overlap: rectangles that only touch along an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: point(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: point(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

/// One of the four directional connection handles on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Top,
    Right,
    Bottom,
    Left,
}

impl Handle {
    pub const ALL: [Handle; 4] = [Handle::Top, Handle::Right, Handle::Bottom, Handle::Left];

    /// Anchor point of this handle on the given (rendered) bounds.
    pub fn anchor(self, bounds: Rect) -> Point {
        let center = bounds.center();
        match self {
            Handle::Top => point(center.x, bounds.min.y),
            Handle::Right => point(bounds.max.x, center.y),
            Handle::Bottom => point(center.x, bounds.max.y),
            Handle::Left => point(bounds.min.x, center.y),
        }
    }
}
