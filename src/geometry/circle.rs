//! Minimal enclosing circle.

use super::{Point, Point2f};

/// Relative slack when testing whether a point is already covered
const COVER_TOLERANCE: f64 = 1e-7;

#[derive(Debug, Clone, Copy)]
struct Circle {
    center: Point2f,
    radius: f64,
}

impl Circle {
    fn covers(&self, p: Point2f) -> bool {
        self.center.distance(p) <= self.radius * (1.0 + COVER_TOLERANCE) + COVER_TOLERANCE
    }

    fn from_two(a: Point2f, b: Point2f) -> Self {
        let center = Point2f::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        Self {
            center,
            radius: center.distance(a),
        }
    }

    fn from_three(a: Point2f, b: Point2f, c: Point2f) -> Self {
        let (bx, by) = (b.x - a.x, b.y - a.y);
        let (cx, cy) = (c.x - a.x, c.y - a.y);
        let d = 2.0 * (bx * cy - by * cx);

        if d.abs() < f64::EPSILON {
            // Collinear: the widest pair spans the other point
            return [Self::from_two(a, b), Self::from_two(a, c), Self::from_two(b, c)]
                .into_iter()
                .fold(Self::from_two(a, b), |best, candidate| {
                    if candidate.radius > best.radius {
                        candidate
                    } else {
                        best
                    }
                });
        }

        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;
        let ux = (cy * b2 - by * c2) / d;
        let uy = (bx * c2 - cx * b2) / d;
        let center = Point2f::new(a.x + ux, a.y + uy);
        Self {
            center,
            radius: ux.hypot(uy),
        }
    }
}

/// Smallest circle containing every point, as `(center, radius)`.
///
/// Incremental construction: each uncovered point must lie on the boundary of
/// the circle covering the points seen so far. An empty slice yields a zero
/// circle at the origin.
#[must_use]
pub fn min_enclosing_circle(points: &[Point]) -> (Point2f, f64) {
    let pts: Vec<Point2f> = points.iter().map(|p| p.to_f()).collect();
    let Some(&first) = pts.first() else {
        return (Point2f::default(), 0.0);
    };

    let mut circle = Circle {
        center: first,
        radius: 0.0,
    };

    for i in 1..pts.len() {
        if circle.covers(pts[i]) {
            continue;
        }
        circle = Circle {
            center: pts[i],
            radius: 0.0,
        };
        for j in 0..i {
            if circle.covers(pts[j]) {
                continue;
            }
            circle = Circle::from_two(pts[i], pts[j]);
            for k in 0..j {
                if !circle.covers(pts[k]) {
                    circle = Circle::from_three(pts[i], pts[j], pts[k]);
                }
            }
        }
    }

    (circle.center, circle.radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_empty() {
        assert_eq!(min_enclosing_circle(&[]), (Point2f::default(), 0.0));
        let (c, r) = min_enclosing_circle(&[Point::new(3, 4)]);
        assert_eq!(c, Point2f::new(3.0, 4.0));
        assert_eq!(r, 0.0);
    }

    #[test]
    fn test_collinear_points() {
        let pts = vec![Point::new(0, 0), Point::new(5, 0), Point::new(10, 0)];
        let (c, r) = min_enclosing_circle(&pts);
        assert!((c.x - 5.0).abs() < 1e-9 && c.y.abs() < 1e-9);
        assert!((r - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_right_triangle_uses_hypotenuse() {
        let pts = vec![Point::new(0, 0), Point::new(6, 0), Point::new(0, 8)];
        let (c, r) = min_enclosing_circle(&pts);
        assert!((c.x - 3.0).abs() < 1e-9 && (c.y - 4.0).abs() < 1e-9);
        assert!((r - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_equilateral_like_triangle() {
        let pts = vec![Point::new(0, 0), Point::new(10, 0), Point::new(5, 9)];
        let (c, r) = min_enclosing_circle(&pts);
        for p in &pts {
            assert!((c.distance(p.to_f()) - r).abs() < 1e-6);
        }
    }

    #[test]
    fn test_circle_samples() {
        let pts: Vec<Point> = (0..36)
            .map(|i| {
                let t = f64::from(i) * 10.0_f64.to_radians();
                Point::new((200.0 + 50.0 * t.cos()).round() as i32, (150.0 + 50.0 * t.sin()).round() as i32)
            })
            .collect();
        let (c, r) = min_enclosing_circle(&pts);
        assert!((c.x - 200.0).abs() < 1.5 && (c.y - 150.0).abs() < 1.5);
        assert!((r - 50.0).abs() < 1.5);
        for p in &pts {
            assert!(c.distance(p.to_f()) <= r + 1e-6);
        }
    }
}
