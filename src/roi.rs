//! Region-of-interest refinement around the palm.
//!
//! The first contour pass can pick up skin-coloured background touching the
//! hand. Restricting the mask to a window a few palm radii wide and extracting
//! again removes most of it.

use crate::{
    constants::{DEFAULT_ROI_HALF_SIDE_FACTOR, MASK_FOREGROUND},
    geometry::{Point, Rect},
    utils::{clip_to_image, image_conversion::intersect_masks, safe_cast::f64_to_i32},
    Error, Result,
};
use image::{GrayImage, Luma};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect as PixelRect};
use log::debug;

/// Builds the palm window mask and applies it to the skin mask
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiRefiner {
    half_side_factor: f64,
}

impl RoiRefiner {
    /// Create a new refiner whose window spans `2 * half_side_factor` palm radii
    #[must_use]
    pub const fn new(half_side_factor: f64) -> Self {
        Self { half_side_factor }
    }

    /// Half side of the window, in palm radii
    #[must_use]
    pub const fn half_side_factor(&self) -> f64 {
        self.half_side_factor
    }

    /// Window around the palm, before clipping.
    ///
    /// # Errors
    ///
    /// Returns `Geometry` for a negative (sentinel) or non-finite radius.
    pub fn window(&self, palm_center: Point, palm_radius: f64) -> Result<Rect> {
        if !palm_radius.is_finite() || palm_radius < 0.0 {
            return Err(Error::Geometry(format!("Invalid palm radius {palm_radius}")));
        }

        let half = self.half_side_factor * palm_radius;
        let corner_x = f64_to_i32(f64::from(palm_center.x) - half)?;
        let corner_y = f64_to_i32(f64::from(palm_center.y) - half)?;
        let side = f64_to_i32(2.0 * half)?;

        Ok(Rect::new(corner_x, corner_y, side, side))
    }

    /// Filled window mask of size `width` × `height`, clipped to the image.
    ///
    /// # Errors
    ///
    /// Returns `Geometry` for a sentinel radius and `InvalidInput` when the
    /// window coordinates overflow.
    pub fn build_mask(&self, width: u32, height: u32, palm_center: Point, palm_radius: f64) -> Result<GrayImage> {
        let window = self.window(palm_center, palm_radius)?;
        let clipped = clip_to_image(window, width, height);

        debug!(
            "ROI around ({}, {}) r = {:.1}: {:?} clipped to {:?}",
            palm_center.x, palm_center.y, palm_radius, window, clipped
        );

        let mut mask = GrayImage::new(width, height);
        if clipped.is_empty() {
            return Ok(mask);
        }

        // `clip_to_image` leaves a non-empty rectangle inside the image
        let fill = PixelRect::at(clipped.x, clipped.y).of_size(clipped.width as u32, clipped.height as u32);
        draw_filled_rect_mut(&mut mask, fill, Luma([MASK_FOREGROUND]));
        Ok(mask)
    }

    /// Skin pixels that fall inside the window
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the two masks differ in size.
    pub fn refine(&self, skin: &GrayImage, roi: &GrayImage) -> Result<GrayImage> {
        intersect_masks(skin, roi)
    }
}

impl Default for RoiRefiner {
    fn default() -> Self {
        Self::new(DEFAULT_ROI_HALF_SIDE_FACTOR)
    }
}
