//! Utility functions for masks and pixel rectangles.

pub mod image_conversion;
pub mod safe_cast;

use crate::geometry::Rect;
use safe_cast::u32_to_i32;

/// Clip `rect` to an image of `width` × `height` pixels.
///
/// The result lies inside `[0, width) × [0, height)`; a rectangle that misses
/// the image entirely collapses to zero size.
#[must_use]
pub fn clip_to_image(rect: Rect, width: u32, height: u32) -> Rect {
    let bounds = Rect::new(
        0,
        0,
        u32_to_i32(width).unwrap_or(i32::MAX),
        u32_to_i32(height).unwrap_or(i32::MAX),
    );
    rect.intersect(&bounds)
}
