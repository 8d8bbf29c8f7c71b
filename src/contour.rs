//! Contour extraction from binary skin masks.
//!
//! Boundaries are traced by `imageproc`'s Suzuki–Abe border following on the
//! non-zero pixels of the mask. Outer borders and hole borders are returned as
//! one flat list; no hierarchy is kept. Straight horizontal, vertical and
//! diagonal runs are compressed to their end points.

use crate::{
    constants::{DEFAULT_APPROX_EPSILON, DEFAULT_MIN_CONTOUR_POINTS},
    geometry::{filter_contours, polygon::approx_poly_dp, Contour, Point},
};
use image::GrayImage;
use imageproc::contours::BorderType;
use log::debug;

/// Keep only the points where the chain changes direction
fn compress_runs(chain: Vec<Point>) -> Vec<Point> {
    let n = chain.len();
    if n <= 2 {
        return chain;
    }
    (0..n)
        .filter(|&i| {
            let prev = chain[(i + n - 1) % n];
            let cur = chain[i];
            let next = chain[(i + 1) % n];
            (cur.x - prev.x, cur.y - prev.y) != (next.x - cur.x, next.y - cur.y)
        })
        .map(|i| chain[i])
        .collect()
}

/// Trace every closed boundary (outer borders and holes) of the non-zero
/// region of `mask`, in raster order of their starting pixel.
#[must_use]
pub fn find_contours(mask: &GrayImage) -> Vec<Contour> {
    if mask.width() == 0 || mask.height() == 0 {
        return Vec::new();
    }

    let borders = imageproc::contours::find_contours::<i32>(mask);
    let holes = borders.iter().filter(|b| matches!(b.border_type, BorderType::Hole)).count();
    debug!("Traced {} borders ({} holes)", borders.len(), holes);

    borders
        .into_iter()
        .map(|border| compress_runs(border.points.into_iter().map(Point::from).collect()))
        .collect()
}

/// Turns a binary mask into the single dominant hand contour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourExtractor {
    min_points: usize,
    epsilon: f64,
}

impl ContourExtractor {
    /// Create a new extractor
    ///
    /// * `min_points` - boundaries with this many vertices or fewer are noise
    /// * `epsilon` - tolerance of the polygon approximation, in pixels
    #[must_use]
    pub const fn new(min_points: usize, epsilon: f64) -> Self {
        Self { min_points, epsilon }
    }

    /// Vertex-count threshold
    #[must_use]
    pub const fn min_points(&self) -> usize {
        self.min_points
    }

    /// Approximation tolerance
    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Extract the dominant contour of `mask`.
    ///
    /// The boundary with the most vertices wins, which favours detailed
    /// outlines over compact blobs of larger area. Returns `None` when no
    /// boundary survives the size filter or the simplified polygon collapses
    /// below three vertices.
    #[must_use]
    pub fn extract(&self, mask: &GrayImage) -> Option<Contour> {
        let contours = find_contours(mask);
        let raw_count = contours.len();
        let largest = filter_contours(contours, self.min_points)?;

        let simplified = approx_poly_dp(&largest, self.epsilon);
        debug!(
            "Extracted contour from {} candidates: {} -> {} points",
            raw_count,
            largest.len(),
            simplified.len()
        );

        if simplified.len() < 3 {
            debug!("Simplified contour is degenerate ({} points)", simplified.len());
            return None;
        }
        Some(simplified)
    }
}

impl Default for ContourExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONTOUR_POINTS, DEFAULT_APPROX_EPSILON)
    }
}
