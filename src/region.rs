//! Geometric description of the hand contour.

use crate::{
    constants::DEFAULT_PALM_SEARCH_RATIO,
    geometry::{
        circle::min_enclosing_circle,
        hull::{convex_hull_indices, convexity_defects, ConvexityDefect},
        polygon::{bounding_rect, point_polygon_distance},
        rect::min_area_rect,
        Point, Point2f, Rect, RotatedRect,
    },
    Error, Result,
};
use serde::Serialize;

/// Largest circle found inside the central part of the contour
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InscribedCircle {
    /// Palm centre
    pub center: Point,
    /// Distance from the centre to the nearest contour edge
    pub radius: f64,
}

/// Everything [`RegionDescriptor::describe`] derives from one contour
#[derive(Debug, Clone, PartialEq)]
pub struct RegionDescription {
    /// Axis-aligned bounding box
    pub bounding_box: Rect,
    /// Minimal-area rotated bounding box
    pub rotated_bounding_box: RotatedRect,
    /// Palm circle, `None` when no interior point was found
    pub palm: Option<InscribedCircle>,
    /// Centre of the minimal enclosing circle
    pub enclosing_center: Point2f,
    /// Radius of the minimal enclosing circle
    pub enclosing_radius: f64,
    /// Convex hull, clockwise
    pub hull: Vec<Point>,
    /// Convex hull as contour indices, same order as `hull`
    pub hull_indices: Vec<usize>,
    /// Convexity defects of the contour against its hull
    pub convexity_defects: Vec<ConvexityDefect>,
}

/// Derives bounding regions, circles and hull from a contour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionDescriptor {
    search_ratio: u32,
}

impl RegionDescriptor {
    /// Create a new descriptor.
    ///
    /// The palm search covers `[1/ratio, 1 - 1/ratio]` of the bounding box
    /// along both axes.
    #[must_use]
    pub const fn new(search_ratio: u32) -> Self {
        Self { search_ratio }
    }

    /// Palm search ratio
    #[must_use]
    pub const fn search_ratio(&self) -> u32 {
        self.search_ratio
    }

    /// Describe `contour`. Pure: identical input gives identical output.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the contour has fewer than three points.
    pub fn describe(&self, contour: &[Point]) -> Result<RegionDescription> {
        if contour.len() < 3 {
            return Err(Error::InvalidInput(format!(
                "Contour needs at least 3 points, got {}",
                contour.len()
            )));
        }

        let bounding_box = bounding_rect(contour);
        let rotated_bounding_box = min_area_rect(contour);
        let palm = self.inscribed_circle(contour, &bounding_box);
        let (enclosing_center, enclosing_radius) = min_enclosing_circle(contour);

        let hull_indices = convex_hull_indices(contour);
        let hull = hull_indices.iter().map(|&i| contour[i]).collect();
        let convexity_defects = convexity_defects(contour, &hull_indices);

        Ok(RegionDescription {
            bounding_box,
            rotated_bounding_box,
            palm,
            enclosing_center,
            enclosing_radius,
            hull,
            hull_indices,
            convexity_defects,
        })
    }

    /// Grid search for the interior point farthest from the contour.
    ///
    /// Scans the central window of `bounding_box` row by row; the first point
    /// reaching a strictly greater positive distance wins, so ties resolve
    /// towards the top-left of the window.
    #[must_use]
    pub fn inscribed_circle(&self, contour: &[Point], bounding_box: &Rect) -> Option<InscribedCircle> {
        let ratio = self.search_ratio.max(1) as i32;
        let keep = 1.0 - 1.0 / f64::from(ratio);

        let x_start = bounding_box.x + bounding_box.width / ratio;
        let x_end = bounding_box.x + (f64::from(bounding_box.width) * keep) as i32;
        let y_start = bounding_box.y + bounding_box.height / ratio;
        let y_end = bounding_box.y + (f64::from(bounding_box.height) * keep) as i32;

        let mut best: Option<InscribedCircle> = None;
        for y in y_start..y_end {
            for x in x_start..x_end {
                let distance = point_polygon_distance(contour, Point2f::new(f64::from(x), f64::from(y)));
                if distance > 0.0 && best.map_or(true, |b| distance > b.radius) {
                    best = Some(InscribedCircle {
                        center: Point::new(x, y),
                        radius: distance,
                    });
                }
            }
        }
        best
    }
}

impl Default for RegionDescriptor {
    fn default() -> Self {
        Self::new(DEFAULT_PALM_SEARCH_RATIO)
    }
}
