use super::{kalman::KalmanFilter, TemporalEstimator};
use crate::{config::EstimatorConfig, geometry::Point2f, Result};
use log::warn;
use nalgebra::{Matrix2x4, Matrix4, Vector2, Vector4};
use serde::Serialize;

/// One frame of the position estimator, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PositionEstimate {
    /// Bounding-box centre fused this frame
    pub measured: Point2f,
    /// A-priori position
    pub predicted: Point2f,
    /// A-posteriori position
    pub estimated: Point2f,
}

/// Constant-velocity estimator for the hand centre
#[derive(Debug, Clone, PartialEq)]
pub struct PositionEstimator {
    filter: KalmanFilter<4, 2>,
    initial_position: Point2f,
}

impl PositionEstimator {
    /// Create an estimator seeded at `initial_position` with zero velocity
    #[must_use]
    pub fn new(config: &EstimatorConfig, initial_position: Point2f) -> Self {
        // x' = x + vx, y' = y + vy, one frame per step
        #[rustfmt::skip]
        let transition = Matrix4::new(
            1.0, 0.0, 1.0, 0.0,
            0.0, 1.0, 0.0, 1.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        #[rustfmt::skip]
        let measurement = Matrix2x4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
        );

        let filter = KalmanFilter::new(
            transition,
            measurement,
            config.process_noise,
            config.measurement_noise,
            config.initial_error_covariance,
        );
        let mut estimator = Self {
            filter,
            initial_position,
        };
        estimator.reset(initial_position);
        estimator
    }

    /// Last a-posteriori position
    #[must_use]
    pub fn last_estimated(&self) -> Point2f {
        let state = self.filter.state();
        Point2f::new(state[0], state[1])
    }

    /// Re-seed at `position`, which also becomes the new initial position
    pub fn reinitialize(&mut self, position: Point2f) {
        self.initial_position = position;
        self.reset(position);
    }

    /// Initial position the estimator was last seeded with
    #[must_use]
    pub const fn initial_position(&self) -> Point2f {
        self.initial_position
    }

    /// Predict, then correct with the measured centre.
    ///
    /// A failed correction keeps the prediction as the estimate.
    pub fn update(&mut self, measured: Point2f) -> PositionEstimate {
        let predicted = self.predict();
        let estimated = self.correct(measured).unwrap_or_else(|e| {
            warn!("Position correction failed: {e}");
            predicted
        });

        PositionEstimate {
            measured,
            predicted,
            estimated,
        }
    }
}

impl TemporalEstimator for PositionEstimator {
    type Value = Point2f;

    fn predict(&mut self) -> Point2f {
        let state = self.filter.predict();
        Point2f::new(state[0], state[1])
    }

    fn correct(&mut self, measurement: Point2f) -> Result<Point2f> {
        let state = self.filter.correct(&Vector2::new(measurement.x, measurement.y))?;
        Ok(Point2f::new(state[0], state[1]))
    }

    fn reset(&mut self, value: Point2f) {
        self.filter.seed(Vector4::new(value.x, value.y, 0.0, 0.0));
    }

    fn name(&self) -> &str {
        "position"
    }
}
