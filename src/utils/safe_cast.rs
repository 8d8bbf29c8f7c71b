//! Checked conversions between image sizes, float geometry and pixel coordinates

use crate::{Error, Result};

/// Image dimension as a signed pixel coordinate
///
/// # Errors
///
/// Returns `InvalidInput` for dimensions beyond `i32::MAX`
pub fn u32_to_i32(value: u32) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::InvalidInput(format!("Dimension {value} exceeds the pixel coordinate range")))
}

/// Float coordinate to pixel, truncating towards zero
///
/// # Errors
///
/// Returns `InvalidInput` for NaN, infinities and values outside the `i32` range
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i32(value: f64) -> Result<i32> {
    let in_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&value);
    if !in_range {
        return Err(Error::InvalidInput(format!("Coordinate {value} is not a valid pixel position")));
    }
    Ok(value as i32)
}

/// Truncate f64 to i32, saturating at the i32 range. NaN maps to 0.
///
/// Used for estimator outputs, which are always reported as pixel positions.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // `as` saturates for floats
pub fn f64_to_i32_saturating(value: f64) -> i32 {
    value as i32
}
