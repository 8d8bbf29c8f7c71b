use super::{kalman::KalmanFilter, TemporalEstimator};
use crate::{config::EstimatorConfig, Result};
use log::{debug, warn};
use nalgebra::{Matrix1x2, Matrix2, Vector1, Vector2};
use serde::Serialize;

/// One frame of the orientation estimator, in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AngleEstimate {
    /// Measurement actually fused (after gating)
    pub measured: f64,
    /// A-priori angle
    pub predicted: f64,
    /// A-posteriori angle
    pub estimated: f64,
}

/// Constant-angular-velocity estimator for the hand angle
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationEstimator {
    filter: KalmanFilter<2, 1>,
    initial_angle: f64,
    last_estimated: f64,
}

impl OrientationEstimator {
    /// Create an estimator seeded at `config.initial_angle` with zero velocity
    #[must_use]
    pub fn new(config: &EstimatorConfig) -> Self {
        let filter = KalmanFilter::new(
            Matrix2::new(1.0, 1.0, 0.0, 1.0),
            Matrix1x2::new(1.0, 0.0),
            config.process_noise,
            config.measurement_noise,
            config.initial_error_covariance,
        );
        let mut estimator = Self {
            filter,
            initial_angle: config.initial_angle,
            last_estimated: config.initial_angle,
        };
        estimator.reset(config.initial_angle);
        estimator
    }

    /// Last filtered angle; the seed until the first correction
    #[must_use]
    pub const fn last_estimated(&self) -> f64 {
        self.last_estimated
    }

    /// Seed angle used by [`Self::reinitialize`]
    #[must_use]
    pub const fn initial_angle(&self) -> f64 {
        self.initial_angle
    }

    /// Re-seed at the configured initial angle
    pub fn reinitialize(&mut self) {
        self.reset(self.initial_angle);
    }

    /// Predict, gate the raw measurement, correct.
    ///
    /// A negative or non-finite `raw` angle is replaced by the last filtered
    /// angle. A failed correction keeps the prediction as the estimate.
    pub fn update(&mut self, raw: f64) -> AngleEstimate {
        let predicted = self.predict();

        let measured = if raw.is_finite() && raw >= 0.0 {
            raw
        } else {
            debug!("Rejected angle measurement {raw}, reusing {:.2}", self.last_estimated);
            self.last_estimated
        };

        let estimated = match self.correct(measured) {
            Ok(angle) => angle,
            Err(e) => {
                warn!("Orientation correction failed: {e}");
                self.last_estimated = predicted;
                predicted
            }
        };

        AngleEstimate {
            measured,
            predicted,
            estimated,
        }
    }
}

impl TemporalEstimator for OrientationEstimator {
    type Value = f64;

    fn predict(&mut self) -> f64 {
        self.filter.predict()[0]
    }

    fn correct(&mut self, measurement: f64) -> Result<f64> {
        let state = self.filter.correct(&Vector1::new(measurement))?;
        self.last_estimated = state[0];
        Ok(state[0])
    }

    fn reset(&mut self, value: f64) {
        self.filter.seed(Vector2::new(value, 0.0));
        self.last_estimated = value;
    }

    fn name(&self) -> &str {
        "orientation"
    }
}
