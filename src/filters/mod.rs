//! Temporal estimators that smooth per-frame hand measurements.
//!
//! Each estimator runs predict, then correct, once per frame in which a hand
//! was found. Frames without a hand leave the estimators untouched.

/// Generic linear Kalman filter
pub mod kalman;

/// Hand orientation (angle, angular velocity)
pub mod orientation;

/// Hand position (x, y, vx, vy)
pub mod position;

use crate::Result;

pub use orientation::{AngleEstimate, OrientationEstimator};
pub use position::{PositionEstimate, PositionEstimator};

/// Predict/correct estimator for one measured quantity
pub trait TemporalEstimator: Send + Sync {
    /// Measured and estimated quantity
    type Value;

    /// Advance one frame with the motion model
    fn predict(&mut self) -> Self::Value;

    /// Fuse a measurement into the prediction of the current frame
    ///
    /// # Errors
    ///
    /// Returns `Filter` if the update cannot be computed
    fn correct(&mut self, measurement: Self::Value) -> Result<Self::Value>;

    /// Re-seed the estimator at `value` with zero velocity
    fn reset(&mut self, value: Self::Value);

    /// Estimator name for logging
    fn name(&self) -> &str;
}
