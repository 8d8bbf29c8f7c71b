//! Geometric primitives and helper routines for hand description.
//!
//! The types mirror the small value types of classic computer-vision
//! libraries (`Point`, `Rect`, `RotatedRect`) so the pipeline stages can pass
//! them around by value without sharing mutable buffers.

/// Bounding rectangles, polygon approximation and point/polygon distance
pub mod polygon;

/// Convex hull and convexity defects
pub mod hull;

/// Minimal enclosing circle
pub mod circle;

/// Minimal-area rotated rectangle
pub mod rect;

use imageproc::point::Point as PixelPoint;
use serde::Serialize;

/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Point {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert to floating point coordinates
    #[must_use]
    pub fn to_f(self) -> Point2f {
        Point2f::new(f64::from(self.x), f64::from(self.y))
    }
}

impl From<PixelPoint<i32>> for Point {
    fn from(p: PixelPoint<i32>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Point> for PixelPoint<i32> {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Sub-pixel coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point2f {
    /// Column
    pub x: f64,
    /// Row
    pub y: f64,
}

impl Point2f {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rect {
    /// Left column
    pub x: i32,
    /// Top row
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Integer centre of the rectangle (truncating division)
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Whether the rectangle covers no pixels
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Intersection with another rectangle; empty rectangles collapse to zero size
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x.saturating_add(self.width)).min(other.x.saturating_add(other.width));
        let y1 = (self.y.saturating_add(self.height)).min(other.y.saturating_add(other.height));
        if x1 <= x0 || y1 <= y0 {
            Self::new(x0, y0, 0, 0)
        } else {
            Self::new(x0, y0, x1 - x0, y1 - y0)
        }
    }

    /// Whether the point lies inside (right and bottom edges exclusive)
    #[must_use]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height
    }
}

/// Rectangle rotated by `angle` degrees around its centre
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RotatedRect {
    /// Centre of the rectangle
    pub center: Point2f,
    /// Extent along the rotated x axis
    pub width: f64,
    /// Extent along the rotated y axis
    pub height: f64,
    /// Rotation in degrees
    pub angle: f64,
}

impl RotatedRect {
    /// Create a new rotated rectangle
    #[must_use]
    pub const fn new(center: Point2f, width: f64, height: f64, angle: f64) -> Self {
        Self {
            center,
            width,
            height,
            angle,
        }
    }

    /// Corner points: bottom-left, top-left, top-right, bottom-right in the
    /// rectangle's own frame
    #[must_use]
    pub fn points(&self) -> [Point2f; 4] {
        let theta = self.angle.to_radians();
        let b = theta.cos() * 0.5;
        let a = theta.sin() * 0.5;

        let p0 = Point2f::new(
            self.center.x - a * self.height - b * self.width,
            self.center.y + b * self.height - a * self.width,
        );
        let p1 = Point2f::new(
            self.center.x + a * self.height - b * self.width,
            self.center.y - b * self.height - a * self.width,
        );
        let p2 = Point2f::new(2.0 * self.center.x - p0.x, 2.0 * self.center.y - p0.y);
        let p3 = Point2f::new(2.0 * self.center.x - p1.x, 2.0 * self.center.y - p1.y);

        [p0, p1, p2, p3]
    }
}

/// Closed polygon; traversal order is insertion order
pub type Contour = Vec<Point>;

/// Orientation (degrees) of the longest side of a rotated rectangle.
///
/// Only the edges `0→1`, `1→2` and `2→3` are measured; the closing edge `3→0`
/// is left out, which never changes the longest length of a true rectangle but
/// does decide which of two equal sides wins. The vector components are
/// truncated to whole pixels before taking the angle, and the y axis is
/// flipped so that angles follow the mathematical convention.
///
/// The result lies in `(-180, 180]` and is not normalised any further.
#[must_use]
pub fn rotated_rect_angle(rect: &RotatedRect) -> f64 {
    let corners = rect.points();

    let lengths: Vec<f64> = (0..3).map(|i| corners[i].distance(corners[i + 1])).collect();

    let mut longest_id = 0;
    let mut longest_value = lengths[0];
    for (i, &length) in lengths.iter().enumerate() {
        if length > longest_value {
            longest_id = i;
            longest_value = length;
        }
    }

    let start = corners[longest_id];
    let end = corners[(longest_id + 1) % 4];

    // `+ 0.0` folds a truncated negative zero into positive zero so that a
    // horizontal edge pointing left reports 180 rather than -180
    let dx = (end.x - start.x).trunc() + 0.0;
    let dy = (start.y - end.y).trunc() + 0.0;

    dy.atan2(dx).to_degrees()
}

/// Drop every contour with `min_points` vertices or fewer and return the one
/// with the most vertices. Ties go to the earliest contour.
#[must_use]
pub fn filter_contours(contours: Vec<Contour>, min_points: usize) -> Option<Contour> {
    let total = contours.len();
    let filtered: Vec<Contour> = contours.into_iter().filter(|c| c.len() > min_points).collect();

    log::debug!("Contours before: {} Contours after: {}", total, filtered.len());

    let mut best: Option<Contour> = None;
    for contour in filtered {
        match &best {
            Some(current) if contour.len() <= current.len() => {}
            _ => best = Some(contour),
        }
    }

    if let Some(contour) = &best {
        log::debug!("Largest contour: {} points", contour.len());
    }
    best
}

/// Angle (degrees) at `vertex` between the segments towards `start` and `end`.
///
/// Returns NaN when either segment has zero length.
#[must_use]
pub fn find_angle(start: Point, end: Point, vertex: Point) -> f64 {
    let u = (f64::from(start.x - vertex.x), f64::from(start.y - vertex.y));
    let v = (f64::from(end.x - vertex.x), f64::from(end.y - vertex.y));

    let norms = u.0.hypot(u.1) * v.0.hypot(v.1);
    if norms == 0.0 {
        return f64::NAN;
    }

    let cos = ((u.0 * v.0 + u.1 * v.1) / norms).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}
