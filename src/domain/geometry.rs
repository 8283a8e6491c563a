//! Geometric types for the editing canvas
//!
//! All coordinates are logical canvas units with the origin at the top-left.

use std::num::NonZeroU32;
use std::ops::{Add, Sub};

/// A point on the canvas
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Relative motion between two pointer events
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub dx: f32,
    pub dy: f32,
}

impl Vector {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, v: Vector) -> Point {
        Point::new(self.x + v.dx, self.y + v.dy)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, other: Point) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }
}

/// Width and height in logical units
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center point of a canvas of this size
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Convert to pixel dimensions, rounding up partial pixels
    pub fn dimensions(self) -> Option<CanvasDimension> {
        let width = NonZeroU32::new(self.width.max(0.0).ceil() as u32)?;
        let height = NonZeroU32::new(self.height.max(0.0).ceil() as u32)?;
        Some(CanvasDimension { width, height })
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f32, height as f32)
    }
}

/// Non-zero pixel dimensions of a raster canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasDimension {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl CanvasDimension {
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn height(&self) -> u32 {
        self.height.get()
    }
}

/// Axis-aligned rectangle in logical coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Rectangle of `size` centered on `center`
    pub fn centered(center: Point, size: Size) -> Self {
        let half_w = size.width / 2.0;
        let half_h = size.height / 2.0;
        Self {
            left: center.x - half_w,
            top: center.y - half_h,
            right: center.x + half_w,
            bottom: center.y + half_h,
        }
    }

    /// Check if this rectangle lies within `[0, canvas]` on both axes
    pub fn within(&self, canvas: Size) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.right <= canvas.width
            && self.bottom <= canvas.height
    }

    /// Check if this rectangle contains a point
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }
}

/// Clamp a proposed center so a box of `size` stays inside `canvas`
///
/// Each axis is clamped independently. When the box is larger than the
/// canvas on an axis, the lower bound wins and the box is pinned to the
/// top/left edge.
pub fn clamp_center(proposed: Point, size: Size, canvas: Size) -> Point {
    let min_x = size.width / 2.0;
    let min_y = size.height / 2.0;
    let max_x = canvas.width - min_x;
    let max_y = canvas.height - min_y;

    Point::new(
        proposed.x.min(max_x).max(min_x),
        proposed.y.min(max_y).max(min_y),
    )
}
