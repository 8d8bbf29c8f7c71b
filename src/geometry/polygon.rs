//! Polygon measurements: bounding rectangle, simplification and signed distance.

use super::{Point, Point2f, Rect};
use imageproc::{geometry::approximate_polygon_dp, point::Point as PixelPoint};

/// Smallest axis-aligned rectangle containing every point.
///
/// Pixel-inclusive: a single point yields a 1×1 rectangle. An empty slice
/// yields the default (empty) rectangle.
#[must_use]
pub fn bounding_rect(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::default();
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
}

/// Signed area (shoelace) in raw image coordinates
#[must_use]
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        acc += i64::from(p.x) * i64::from(q.y) - i64::from(q.x) * i64::from(p.y);
    }
    acc as f64 / 2.0
}

/// Closed-polygon approximation with tolerance `epsilon`.
///
/// The polygon is split at vertex 0 and the vertex farthest from it, and each
/// half is simplified as an open chain by `imageproc`'s Douglas–Peucker. The
/// output is an ordered subset of the input, so it never has more vertices
/// than the input. A non-positive tolerance leaves the polygon untouched.
#[must_use]
pub fn approx_poly_dp(points: &[Point], epsilon: f64) -> Vec<Point> {
    let n = points.len();
    if n < 3 || epsilon.is_nan() || epsilon <= 0.0 {
        return points.to_vec();
    }

    let anchor = points[0].to_f();
    let mut split = 0;
    let mut split_dist = 0.0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let d = p.to_f().distance(anchor);
        if d > split_dist {
            split_dist = d;
            split = i;
        }
    }
    if split == 0 {
        // Every vertex coincides with the anchor
        return vec![points[0]];
    }

    // The polygon closed back onto the anchor, so both halves are open chains
    let ring: Vec<PixelPoint<i32>> = points.iter().chain(std::iter::once(&points[0])).map(|&p| p.into()).collect();

    let mut simplified: Vec<Point> = approximate_polygon_dp(&ring[..=split], epsilon, false)
        .into_iter()
        .map(Point::from)
        .collect();
    let second = approximate_polygon_dp(&ring[split..], epsilon, false);

    // Drop the shared split vertex and the closing copy of the anchor
    let inner = second.len().saturating_sub(2);
    simplified.extend(second.into_iter().skip(1).take(inner).map(Point::from));
    simplified
}

/// Distance from `p` to the segment `a`-`b`
fn segment_distance(p: Point2f, a: Point2f, b: Point2f) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    p.distance(Point2f::new(a.x + t * dx, a.y + t * dy))
}

/// Signed distance from `p` to the closed polygon: positive inside, negative
/// outside, zero on an edge.
#[must_use]
pub fn point_polygon_distance(polygon: &[Point], p: Point2f) -> f64 {
    let n = polygon.len();
    if n == 0 {
        return f64::NEG_INFINITY;
    }

    let mut min_dist = f64::INFINITY;
    let mut inside = false;
    for i in 0..n {
        let a = polygon[i].to_f();
        let b = polygon[(i + 1) % n].to_f();

        min_dist = min_dist.min(segment_distance(p, a, b));

        // Even-odd crossing test on a half-open y interval
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }

    if min_dist == 0.0 {
        0.0
    } else if inside {
        min_dist
    } else {
        -min_dist
    }
}
