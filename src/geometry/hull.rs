//! Convex hull and convexity defects of a contour.

use super::{polygon::signed_area, Point};
use imageproc::point::Point as PixelPoint;
use serde::Serialize;

/// Region between the contour and one hull edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvexityDefect {
    /// Contour index where the hull edge starts
    pub start: usize,
    /// Contour index where the hull edge ends
    pub end: usize,
    /// Contour index of the point farthest from the hull edge
    pub far: usize,
    /// Distance (pixels) from `far` to the hull edge
    pub depth: f64,
}

fn cross(o: Point, a: Point, b: Point) -> i64 {
    i64::from(a.x - o.x) * i64::from(b.y - o.y) - i64::from(a.y - o.y) * i64::from(b.x - o.x)
}

/// Remove hull vertices lying on the segment between their neighbours
fn drop_collinear(hull: &mut Vec<Point>) {
    let mut i = 0;
    while hull.len() >= 3 && i < hull.len() {
        let n = hull.len();
        let (prev, next) = (hull[(i + n - 1) % n], hull[(i + 1) % n]);
        if cross(prev, hull[i], next) == 0 {
            hull.remove(i);
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }
}

/// Indices of the convex hull vertices, clockwise.
///
/// "Clockwise" is meant with the y axis pointing up, i.e. the hull has a
/// negative shoelace area when computed on raw image coordinates. Collinear
/// points and duplicates are not part of the hull; the first occurrence of a
/// duplicated point is the one referenced.
#[must_use]
pub fn convex_hull_indices(points: &[Point]) -> Vec<usize> {
    let first_index = |p: &Point| points.iter().position(|q| q == p);

    let mut unique = points.to_vec();
    unique.sort_unstable();
    unique.dedup();
    if unique.len() < 3 {
        return unique.iter().filter_map(first_index).collect();
    }

    let input: Vec<PixelPoint<i32>> = unique.iter().map(|&p| p.into()).collect();
    let mut hull: Vec<Point> = imageproc::geometry::convex_hull(&input).into_iter().map(Point::from).collect();
    drop_collinear(&mut hull);

    if hull.len() < 3 {
        // All points collinear: the hull degenerates to the two extremes
        hull = vec![unique[0], unique[unique.len() - 1]];
    } else if signed_area(&hull) > 0.0 {
        hull.reverse();
    }

    hull.iter().filter_map(first_index).collect()
}

/// Convex hull points, clockwise (see [`convex_hull_indices`])
#[must_use]
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    convex_hull_indices(points).into_iter().map(|i| points[i]).collect()
}

/// Convexity defects of `contour` with respect to its hull.
///
/// The hull indices are walked in contour order, so the hull orientation does
/// not matter. Each hull edge spanning at least one contour vertex yields a
/// defect at its deepest vertex, provided that vertex lies strictly inside the
/// hull (depth > 0). A convex contour has no defects.
#[must_use]
pub fn convexity_defects(contour: &[Point], hull_indices: &[usize]) -> Vec<ConvexityDefect> {
    let n = contour.len();
    if n < 4 || hull_indices.len() < 3 {
        return Vec::new();
    }

    let mut sorted = hull_indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut defects = Vec::new();
    for (k, &start) in sorted.iter().enumerate() {
        let end = sorted[(k + 1) % sorted.len()];
        let span = (end + n - start) % n;
        if span < 2 {
            continue;
        }

        let a = contour[start];
        let b = contour[end];
        let dx = f64::from(b.x - a.x);
        let dy = f64::from(b.y - a.y);
        let len = dx.hypot(dy);
        if len == 0.0 {
            continue;
        }

        let mut depth = 0.0;
        let mut far = start;
        for step in 1..span {
            let idx = (start + step) % n;
            let p = contour[idx];
            let d = (dx * f64::from(p.y - a.y) - dy * f64::from(p.x - a.x)).abs() / len;
            if d > depth {
                depth = d;
                far = idx;
            }
        }

        if depth > 0.0 {
            defects.push(ConvexityDefect { start, end, far, depth });
        }
    }
    defects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon::point_polygon_distance;
    use proptest::prelude::*;

    #[test]
    fn test_hull_of_square_with_interior_points() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(5, 5),
            Point::new(10, 0),
            Point::new(5, 2),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point::new(5, 5)));
        assert!(signed_area(&hull) < 0.0, "hull must be clockwise (y up)");
    }

    #[test]
    fn test_hull_drops_collinear_and_duplicates() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(5, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
            Point::new(0, 0),
        ];
        let idx = convex_hull_indices(&pts);
        assert_eq!(idx.len(), 4);
        assert!(!idx.contains(&1));
        assert!(!idx.contains(&5));
    }

    #[test]
    fn test_drop_collinear() {
        let mut hull = vec![
            Point::new(0, 0),
            Point::new(0, 5),
            Point::new(0, 10),
            Point::new(10, 10),
            Point::new(10, 0),
            Point::new(5, 0),
        ];
        drop_collinear(&mut hull);
        assert_eq!(
            hull,
            vec![Point::new(0, 0), Point::new(0, 10), Point::new(10, 10), Point::new(10, 0)]
        );
    }

    #[test]
    fn test_hull_indices_reference_first_duplicate() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(10, 0),
            Point::new(0, 10),
        ];
        let idx = convex_hull_indices(&pts);
        assert_eq!(idx.len(), 4);
        assert!(idx.contains(&1) && !idx.contains(&3));
    }

    #[test]
    fn test_hull_collinear_input() {
        let pts = vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 2);
    }

    #[test]
    fn test_hull_contains_all_points() {
        let pts: Vec<Point> = (0..40)
            .map(|i| {
                let t = f64::from(i) * 9.0_f64.to_radians();
                let r = if i % 2 == 0 { 40.0 } else { 25.0 };
                Point::new((100.0 + r * t.cos()) as i32, (100.0 + r * t.sin()) as i32)
            })
            .collect();
        let hull = convex_hull(&pts);
        for p in &pts {
            assert!(point_polygon_distance(&hull, p.to_f()) >= 0.0, "{p:?} outside hull");
        }
    }

    #[test]
    fn test_defects_of_c_shape() {
        // A "C" opening to the right
        let contour = vec![
            Point::new(0, 0),
            Point::new(30, 0),
            Point::new(30, 10),
            Point::new(10, 10),
            Point::new(10, 20),
            Point::new(30, 20),
            Point::new(30, 30),
            Point::new(0, 30),
        ];
        let hull = convex_hull_indices(&contour);
        let defects = convexity_defects(&contour, &hull);
        assert_eq!(defects.len(), 1);
        let defect = defects[0];
        // The collinear vertices on x = 30 are not hull vertices
        assert_eq!(defect.start, 1);
        assert_eq!(defect.end, 6);
        assert_eq!(defect.far, 3);
        assert!((defect.depth - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_convex_contour_has_no_defects() {
        let contour = vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(20, 0),
            Point::new(20, 20),
            Point::new(0, 20),
        ];
        let hull = convex_hull_indices(&contour);
        assert!(convexity_defects(&contour, &hull).is_empty());
    }

    fn point_set() -> impl Strategy<Value = Vec<Point>> {
        prop::collection::vec((0..200i32, 0..200i32).prop_map(|(x, y)| Point::new(x, y)), 3..60)
    }

    proptest! {
        #[test]
        fn prop_hull_contains_every_point(pts in point_set()) {
            let hull = convex_hull(&pts);
            prop_assume!(hull.len() >= 3);
            prop_assert!(signed_area(&hull) < 0.0);
            for p in &pts {
                prop_assert!(point_polygon_distance(&hull, p.to_f()) >= -1e-6);
            }
        }

        #[test]
        fn prop_defects_lie_between_their_hull_vertices(pts in point_set()) {
            let hull = convex_hull_indices(&pts);
            for defect in convexity_defects(&pts, &hull) {
                prop_assert!(defect.depth > 0.0);
                prop_assert!(defect.far < pts.len());
                prop_assert!(hull.contains(&defect.start) && hull.contains(&defect.end));
            }
        }
    }
}
