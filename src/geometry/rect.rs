//! Minimal-area enclosing rectangle.

use super::{hull::convex_hull, Point, Point2f, RotatedRect};
use imageproc::point::Point as PixelPoint;

/// Bring `(width, height, angle)` into the `[-90, 0)` angle convention.
///
/// A rectangle is unchanged by a half turn, and a quarter turn swaps its sides,
/// so every rectangle has exactly one representation in that range.
fn normalize(width: f64, height: f64, angle: f64) -> (f64, f64, f64) {
    let mut angle = (angle + 90.0).rem_euclid(180.0) - 90.0;
    let (mut width, mut height) = (width, height);
    if angle >= 0.0 {
        angle -= 90.0;
        std::mem::swap(&mut width, &mut height);
    }
    (width, height, angle)
}

/// Rotated rectangle through four consecutive corners
fn from_corners(corners: [Point2f; 4]) -> RotatedRect {
    let center = Point2f::new(
        corners.iter().map(|c| c.x).sum::<f64>() / 4.0,
        corners.iter().map(|c| c.y).sum::<f64>() / 4.0,
    );
    let [a, b, c, _] = corners;
    let angle = (b.y - a.y).atan2(b.x - a.x).to_degrees();
    let (width, height, angle) = normalize(a.distance(b), b.distance(c), angle);
    RotatedRect::new(center, width, height, angle)
}

/// Minimal-area rectangle enclosing every point.
///
/// Rotating calipers over the convex hull, computed by `imageproc`. Corners
/// land on whole pixels. The angle is reported in `[-90, 0)` degrees.
#[must_use]
pub fn min_area_rect(points: &[Point]) -> RotatedRect {
    let hull = convex_hull(points);

    match hull.len() {
        0 => RotatedRect::default(),
        1 => RotatedRect::new(hull[0].to_f(), 0.0, 0.0, -90.0),
        2 => {
            let (a, b) = (hull[0].to_f(), hull[1].to_f());
            let center = Point2f::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
            let angle = (b.y - a.y).atan2(b.x - a.x).to_degrees();
            let (width, height, angle) = normalize(a.distance(b), 0.0, angle);
            RotatedRect::new(center, width, height, angle)
        }
        _ => {
            let input: Vec<PixelPoint<i32>> = hull.iter().map(|&p| p.into()).collect();
            let corners = imageproc::geometry::min_area_rect(&input).map(|c| Point::from(c).to_f());
            from_corners(corners)
        }
    }
}
