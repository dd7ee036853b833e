// Point and axis-aligned rectangle primitives used by the placement engine.

use serde::{Deserialize, Serialize};

use super::error::{PlacementError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle with `min <= max` on both axes.
///
/// The fields are private so every value goes through [`Rect::from_corners`]
/// and is well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    min: Point,
    max: Point,
}

impl Rect {
    /// Build a rect from two opposite corners given in any order.
    ///
    /// Zero-area rects are accepted; only non-finite coordinates fail.
    pub fn from_corners(a: Point, b: Point) -> Result<Self> {
        for p in [a, b] {
            if !p.is_finite() {
                return Err(PlacementError::DegenerateInput { x: p.x, y: p.y });
            }
        }
        Ok(Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        })
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Closed on every edge: boundary points are inside.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True when the rects share at least one point.
    ///
    /// Uses closed intervals per axis, so rects that only touch along an
    /// edge or at a corner intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}
