//! Per-frame hand description and its temporal tracking.
//!
//! [`HandTracker::update`] runs the full pipeline on one skin mask:
//!
//! 1. extract the dominant contour,
//! 2. describe it (bounding boxes, palm circle, enclosing circle, hull),
//! 3. restrict the mask to a window around the palm and extract again,
//! 4. re-describe the refined contour,
//! 5. run the orientation estimator, then the position estimator.
//!
//! The new [`HandState`] and the new estimator states are computed on copies
//! and committed together at the end of the frame.

use crate::{
    config::Config,
    constants::PALM_RADIUS_NOT_FOUND,
    contour::ContourExtractor,
    filters::{AngleEstimate, OrientationEstimator, PositionEstimate, PositionEstimator},
    geometry::{hull::ConvexityDefect, rotated_rect_angle, Contour, Point, Point2f, Rect, RotatedRect},
    probe::PositionProbe,
    region::{RegionDescription, RegionDescriptor},
    roi::RoiRefiner,
    utils::safe_cast::f64_to_i32_saturating,
    Error, Result,
};
use image::{DynamicImage, GenericImageView, GrayImage};
use log::{debug, info, warn};
use serde::Serialize;

/// Description of the tracked hand after the latest frame.
///
/// Geometry and estimates are only meaningful while [`HandState::found`] is
/// true. A frame without a hand clears the contour, hull and defects and keeps
/// every other value from the last frame with a hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandState {
    found: bool,
    contour: Contour,
    bounding_box: Rect,
    rotated_bounding_box: RotatedRect,
    palm_center: Point,
    palm_radius: f64,
    enclosing_center: Point2f,
    enclosing_radius: f64,
    hull: Vec<Point>,
    hull_indices: Vec<usize>,
    convexity_defects: Vec<ConvexityDefect>,
    angle: f64,
    angle_predicted: f64,
    angle_estimated: f64,
    center: Point,
    center_predicted: Point,
    center_estimated: Point,
}

impl Default for HandState {
    fn default() -> Self {
        Self {
            found: false,
            contour: Vec::new(),
            bounding_box: Rect::default(),
            rotated_bounding_box: RotatedRect::default(),
            palm_center: Point::default(),
            palm_radius: PALM_RADIUS_NOT_FOUND,
            enclosing_center: Point2f::default(),
            enclosing_radius: 0.0,
            hull: Vec::new(),
            hull_indices: Vec::new(),
            convexity_defects: Vec::new(),
            angle: 0.0,
            angle_predicted: 0.0,
            angle_estimated: 0.0,
            center: Point::default(),
            center_predicted: Point::default(),
            center_estimated: Point::default(),
        }
    }
}

impl HandState {
    /// Whether a hand was found in the latest frame
    #[must_use]
    pub const fn found(&self) -> bool {
        self.found
    }

    /// Simplified hand contour
    #[must_use]
    pub fn contour(&self) -> &[Point] {
        &self.contour
    }

    /// Axis-aligned bounding box of the first-pass contour
    #[must_use]
    pub const fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    /// Minimal-area bounding box of the first-pass contour
    #[must_use]
    pub const fn rotated_bounding_box(&self) -> RotatedRect {
        self.rotated_bounding_box
    }

    /// Palm centre
    #[must_use]
    pub const fn palm_center(&self) -> Point {
        self.palm_center
    }

    /// Palm radius, `PALM_RADIUS_NOT_FOUND` when the search failed
    #[must_use]
    pub const fn palm_radius(&self) -> f64 {
        self.palm_radius
    }

    /// Centre of the minimal enclosing circle
    #[must_use]
    pub const fn enclosing_center(&self) -> Point2f {
        self.enclosing_center
    }

    /// Radius of the minimal enclosing circle
    #[must_use]
    pub const fn enclosing_radius(&self) -> f64 {
        self.enclosing_radius
    }

    /// Convex hull, clockwise
    #[must_use]
    pub fn hull(&self) -> &[Point] {
        &self.hull
    }

    /// Convex hull as indices into [`Self::contour`]
    #[must_use]
    pub fn hull_indices(&self) -> &[usize] {
        &self.hull_indices
    }

    /// Convexity defects of the contour
    #[must_use]
    pub fn convexity_defects(&self) -> &[ConvexityDefect] {
        &self.convexity_defects
    }

    /// Angle measurement fused this frame (after gating), degrees
    #[must_use]
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Predicted angle, degrees
    #[must_use]
    pub const fn angle_predicted(&self) -> f64 {
        self.angle_predicted
    }

    /// Filtered angle, degrees
    #[must_use]
    pub const fn angle_estimated(&self) -> f64 {
        self.angle_estimated
    }

    /// Measured centre (bounding-box centre)
    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    /// Predicted centre
    #[must_use]
    pub const fn center_predicted(&self) -> Point {
        self.center_predicted
    }

    /// Filtered centre
    #[must_use]
    pub const fn center_estimated(&self) -> Point {
        self.center_estimated
    }

    fn mark_lost(&mut self) {
        self.found = false;
        self.contour.clear();
        self.hull.clear();
        self.hull_indices.clear();
        self.convexity_defects.clear();
    }
}

/// Runs the hand pipeline frame by frame and owns the estimators
#[derive(Debug, Clone)]
pub struct HandTracker {
    extractor: ContourExtractor,
    descriptor: RegionDescriptor,
    refiner: RoiRefiner,
    orientation: OrientationEstimator,
    position: PositionEstimator,
    state: HandState,
    frames: u64,
}

impl HandTracker {
    /// Create a tracker. The position estimator is seeded from `probe`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an invalid configuration, or the probe error
    /// if the initial position cannot be read
    pub fn new(config: &Config, probe: &dyn PositionProbe) -> Result<Self> {
        config.validate()?;
        let initial_position = probe.position()?;

        info!(
            "Hand tracker created: initial position ({:.1}, {:.1}) from {} probe, initial angle {:.1}",
            initial_position.x,
            initial_position.y,
            probe.name(),
            config.estimator.initial_angle
        );

        Ok(Self {
            extractor: ContourExtractor::new(config.contour.min_points, config.contour.approx_epsilon),
            descriptor: RegionDescriptor::new(config.palm.search_ratio),
            refiner: RoiRefiner::new(config.roi.half_side_factor),
            orientation: OrientationEstimator::new(&config.estimator),
            position: PositionEstimator::new(&config.estimator, initial_position),
            state: HandState::default(),
            frames: 0,
        })
    }

    /// State after the latest frame
    #[must_use]
    pub const fn state(&self) -> &HandState {
        &self.state
    }

    /// Number of frames processed so far
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Re-seed both estimators: orientation at its configured prior, position
    /// at the probe's current reading
    ///
    /// # Errors
    ///
    /// Returns the probe error; the estimators are left untouched in that case
    pub fn reinitialize(&mut self, probe: &dyn PositionProbe) -> Result<()> {
        let position = probe.position()?;
        self.orientation.reinitialize();
        self.position.reinitialize(position);
        info!("Hand tracker reinitialized at ({:.1}, {:.1})", position.x, position.y);
        Ok(())
    }

    /// Process one frame given its original image and skin mask.
    ///
    /// The frame only provides the expected size.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the frame and mask sizes differ
    pub fn update_with_frame(&mut self, frame: &DynamicImage, mask: &GrayImage) -> Result<&HandState> {
        if frame.dimensions() != mask.dimensions() {
            return Err(Error::InvalidInput(format!(
                "Frame size {:?} does not match mask size {:?}",
                frame.dimensions(),
                mask.dimensions()
            )));
        }
        Ok(self.update(mask))
    }

    /// Process one skin mask. Any non-zero pixel counts as skin.
    pub fn update(&mut self, mask: &GrayImage) -> &HandState {
        self.frames += 1;

        let Some(first_pass) = self.extractor.extract(mask) else {
            debug!("Frame {}: no hand found", self.frames);
            self.state.mark_lost();
            return &self.state;
        };

        let first = match self.descriptor.describe(&first_pass) {
            Ok(description) => description,
            Err(e) => {
                warn!("Frame {}: contour could not be described: {e}", self.frames);
                self.state.mark_lost();
                return &self.state;
            }
        };

        let (palm_center, palm_radius) = match first.palm {
            Some(palm) => (palm.center, palm.radius),
            None => {
                warn!("Frame {}: inscribed circle could not be found", self.frames);
                (self.state.palm_center, PALM_RADIUS_NOT_FOUND)
            }
        };

        let (contour, refined) = self.refine(mask, first_pass, &first, palm_center, palm_radius);
        let (palm_center, palm_radius) = refined
            .palm
            .map_or((palm_center, palm_radius), |palm| (palm.center, palm.radius));

        let mut orientation = self.orientation.clone();
        let mut position = self.position.clone();
        let angle: AngleEstimate = orientation.update(rotated_rect_angle(&first.rotated_bounding_box));
        let center = first.bounding_box.center();
        let estimate: PositionEstimate = position.update(center.to_f());

        let state = HandState {
            found: true,
            contour,
            bounding_box: first.bounding_box,
            rotated_bounding_box: first.rotated_bounding_box,
            palm_center,
            palm_radius,
            enclosing_center: refined.enclosing_center,
            enclosing_radius: refined.enclosing_radius,
            hull: refined.hull,
            hull_indices: refined.hull_indices,
            convexity_defects: refined.convexity_defects,
            angle: angle.measured,
            angle_predicted: angle.predicted,
            angle_estimated: angle.estimated,
            center,
            center_predicted: to_pixel(estimate.predicted),
            center_estimated: to_pixel(estimate.estimated),
        };

        debug!(
            "Frame {}: {} points, angle {:.1} -> {:.1}, centre ({}, {}) -> ({}, {})",
            self.frames,
            state.contour.len(),
            state.angle,
            state.angle_estimated,
            state.center.x,
            state.center.y,
            state.center_estimated.x,
            state.center_estimated.y
        );

        self.orientation = orientation;
        self.position = position;
        self.state = state;
        &self.state
    }

    /// Second extraction inside the palm window. Falls back to the first-pass
    /// contour and description whenever refinement is impossible.
    fn refine(
        &self,
        mask: &GrayImage,
        first_pass: Contour,
        first: &RegionDescription,
        palm_center: Point,
        palm_radius: f64,
    ) -> (Contour, RegionDescription) {
        if palm_radius < 0.0 {
            debug!("Frame {}: no palm circle, refinement skipped", self.frames);
            return (first_pass, first.clone());
        }

        let refined_mask = match self
            .refiner
            .build_mask(mask.width(), mask.height(), palm_center, palm_radius)
            .and_then(|roi| self.refiner.refine(mask, &roi))
        {
            Ok(refined_mask) => refined_mask,
            Err(e) => {
                warn!("Frame {}: ROI refinement failed: {e}", self.frames);
                return (first_pass, first.clone());
            }
        };

        let Some(contour) = self.extractor.extract(&refined_mask) else {
            debug!("Frame {}: nothing left inside the ROI, keeping first pass", self.frames);
            return (first_pass, first.clone());
        };

        match self.descriptor.describe(&contour) {
            Ok(description) => (contour, description),
            Err(e) => {
                warn!("Frame {}: refined contour could not be described: {e}", self.frames);
                (first_pass, first.clone())
            }
        }
    }
}

fn to_pixel(p: Point2f) -> Point {
    Point::new(f64_to_i32_saturating(p.x), f64_to_i32_saturating(p.y))
}
