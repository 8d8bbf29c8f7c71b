//! Linear Kalman filter over fixed-size nalgebra matrices.
//!
//! `S` is the state dimension and `M` the measurement dimension. The filter
//! keeps both the a-priori (`*_pre`) and a-posteriori (`*_post`) estimates.
//! `predict` copies the a-priori estimate into the a-posteriori one, so a
//! frame without a correction carries the prediction forward.

use crate::{Error, Result};
use nalgebra::{SMatrix, SVector};

/// Linear Kalman filter
#[derive(Debug, Clone, PartialEq)]
pub struct KalmanFilter<const S: usize, const M: usize> {
    /// State transition matrix (F)
    transition: SMatrix<f64, S, S>,
    /// Measurement matrix (H)
    measurement: SMatrix<f64, M, S>,
    /// Process noise covariance (Q)
    process_noise: SMatrix<f64, S, S>,
    /// Measurement noise covariance (R)
    measurement_noise: SMatrix<f64, M, M>,
    /// Error covariance restored by `seed`
    initial_error_cov: SMatrix<f64, S, S>,
    state_pre: SVector<f64, S>,
    state_post: SVector<f64, S>,
    error_cov_pre: SMatrix<f64, S, S>,
    error_cov_post: SMatrix<f64, S, S>,
}

impl<const S: usize, const M: usize> KalmanFilter<S, M> {
    /// Create a filter with diagonal noise covariances and a zero state
    ///
    /// * `process_noise` - diagonal of Q
    /// * `measurement_noise` - diagonal of R
    /// * `initial_error_covariance` - diagonal of the initial a-posteriori P
    #[must_use]
    pub fn new(
        transition: SMatrix<f64, S, S>,
        measurement: SMatrix<f64, M, S>,
        process_noise: f64,
        measurement_noise: f64,
        initial_error_covariance: f64,
    ) -> Self {
        let initial_error_cov = SMatrix::<f64, S, S>::identity() * initial_error_covariance;
        Self {
            transition,
            measurement,
            process_noise: SMatrix::<f64, S, S>::identity() * process_noise,
            measurement_noise: SMatrix::<f64, M, M>::identity() * measurement_noise,
            initial_error_cov,
            state_pre: SVector::zeros(),
            state_post: SVector::zeros(),
            error_cov_pre: initial_error_cov,
            error_cov_post: initial_error_cov,
        }
    }

    /// Restart from `state` with the initial error covariance
    pub fn seed(&mut self, state: SVector<f64, S>) {
        self.state_pre = state;
        self.state_post = state;
        self.error_cov_pre = self.initial_error_cov;
        self.error_cov_post = self.initial_error_cov;
    }

    /// Time update. Returns the predicted state.
    pub fn predict(&mut self) -> SVector<f64, S> {
        // x⁻ = F·x⁺
        self.state_pre = self.transition * self.state_post;

        // P⁻ = F·P⁺·Fᵀ + Q
        self.error_cov_pre = self.transition * self.error_cov_post * self.transition.transpose() + self.process_noise;

        self.state_post = self.state_pre;
        self.error_cov_post = self.error_cov_pre;

        self.state_pre
    }

    /// Measurement update. Returns the corrected state.
    ///
    /// # Errors
    ///
    /// Returns `Filter` if the innovation covariance is singular; the state is
    /// left at the prediction.
    pub fn correct(&mut self, z: &SVector<f64, M>) -> Result<SVector<f64, S>> {
        let h = &self.measurement;
        let innovation_cov = h * self.error_cov_pre * h.transpose() + self.measurement_noise;
        let inverse = innovation_cov
            .try_inverse()
            .ok_or_else(|| Error::Filter("Innovation covariance is singular".to_string()))?;

        // K = P⁻·Hᵀ·(H·P⁻·Hᵀ + R)⁻¹
        let gain = self.error_cov_pre * h.transpose() * inverse;

        let innovation = z - h * self.state_pre;
        self.state_post = self.state_pre + gain * innovation;

        // P⁺ = P⁻ − K·H·P⁻
        self.error_cov_post = self.error_cov_pre - gain * h * self.error_cov_pre;

        Ok(self.state_post)
    }

    /// Latest a-posteriori state
    #[must_use]
    pub const fn state(&self) -> &SVector<f64, S> {
        &self.state_post
    }

    /// Latest a-posteriori error covariance
    #[must_use]
    pub const fn error_covariance(&self) -> &SMatrix<f64, S, S> {
        &self.error_cov_post
    }
}
