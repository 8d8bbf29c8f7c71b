//! Convergence and gating of the orientation and position estimators


use approx::assert_relative_eq;
use hand_tracking::{
    config::{Config, EstimatorConfig},
    filters::{OrientationEstimator, PositionEstimator, TemporalEstimator},
    geometry::Point2f,
    hand::HandTracker,
    probe::FixedPosition,
};
use test_helpers::ellipse_mask;

#[test]
fn test_orientation_converges_from_any_prior() {
    for prior in [0.0, 90.0, 170.0] {
        let config = EstimatorConfig {
            initial_angle: prior,
            ..EstimatorConfig::default()
        };
        let mut estimator = OrientationEstimator::new(&config);

        let mut errors = Vec::new();
        for _ in 0..150 {
            let estimate = estimator.update(45.0);
            errors.push((estimate.estimated - 45.0).abs());
        }

        // Twenty frames in, the residual is still a few degrees
        assert!(errors[19] < 6.0, "prior {prior}: {}", errors[19]);
        assert!(errors[149] < 0.01, "prior {prior}: {}", errors[149]);
        assert!(errors[149] < errors[19], "prior {prior}");
    }
}

#[test]
fn test_position_converges_from_any_prior() {
    let target = Point2f::new(100.0, 100.0);
    for prior in [Point2f::new(0.0, 0.0), Point2f::new(100.0, 100.0), Point2f::new(1000.0, -500.0)] {
        let mut estimator = PositionEstimator::new(&EstimatorConfig::default(), prior);
        let estimates: Vec<Point2f> = (0..150).map(|_| estimator.update(target).estimated).collect();

        // After twenty frames each axis has covered at least 95% of the way
        let early = estimates[19];
        assert!((early.x - target.x).abs() <= 0.05 * (prior.x - target.x).abs() + 1e-9, "prior {prior:?}: {early:?}");
        assert!((early.y - target.y).abs() <= 0.05 * (prior.y - target.y).abs() + 1e-9, "prior {prior:?}: {early:?}");

        let last = estimates[149];
        assert!(last.distance(target) < 0.01, "prior {prior:?}: {last:?}");
    }
}

#[test]
fn test_position_residual_after_twenty_frames() {
    let target = Point2f::new(100.0, 100.0);
    let mut estimator = PositionEstimator::new(&EstimatorConfig::default(), Point2f::new(0.0, 0.0));
    let mut last = estimator.update(target);
    for _ in 1..20 {
        last = estimator.update(target);
    }
    assert!((last.estimated.x - 100.0).abs() < 5.0, "{last:?}");
    assert!((last.estimated.y - 100.0).abs() < 5.0, "{last:?}");
    // The velocity term overshoots before settling
    assert!(last.estimated.distance(target) > 1.0, "{last:?}");
}

#[test]
fn test_invalid_angle_equals_reusing_filtered_angle() {
    let config = EstimatorConfig::default();
    let mut gated = OrientationEstimator::new(&config);
    let mut manual = OrientationEstimator::new(&config);

    for angle in [60.0, 62.0, 65.0, 63.0] {
        gated.update(angle);
        manual.update(angle);
    }

    for invalid in [-1.0, -179.5, f64::NAN, f64::NEG_INFINITY] {
        let previous = manual.last_estimated();
        let a = gated.update(invalid);
        let b = manual.update(previous);
        assert_relative_eq!(a.measured, b.measured);
        assert_relative_eq!(a.predicted, b.predicted);
        assert_relative_eq!(a.estimated, b.estimated);
    }
}

#[test]
fn test_gating_before_first_correction_uses_prior() {
    let mut estimator = OrientationEstimator::new(&EstimatorConfig::default());
    let estimate = estimator.update(-3.0);
    assert_relative_eq!(estimate.measured, 90.0);
}

#[test]
fn test_predict_without_correct_extrapolates() {
    let mut estimator = PositionEstimator::new(&EstimatorConfig::default(), Point2f::new(0.0, 0.0));
    for i in 0..50 {
        estimator.update(Point2f::new(f64::from(i) * 2.0, 0.0));
    }
    let before = estimator.last_estimated();
    let predicted = estimator.predict();
    // Moving right at roughly two pixels per frame
    assert!(predicted.x > before.x + 1.0, "{before:?} -> {predicted:?}");
}

#[test]
fn test_tracker_converges_on_static_hand() {
    let mask = ellipse_mask(400, 300, 200.0, 150.0, 80.0, 25.0, 45.0);
    let mut tracker = HandTracker::new(&Config::default(), &FixedPosition::new(0.0, 0.0)).unwrap();

    for _ in 0..150 {
        tracker.update(&mask);
    }
    let state = tracker.state();

    assert!(state.found());
    assert!((state.angle() - 45.0).abs() < 5.0, "{}", state.angle());
    assert!((state.angle_estimated() - state.angle()).abs() < 0.01);
    assert!((state.angle_predicted() - state.angle()).abs() < 0.01);

    let center = state.center();
    assert!((center.x - 200).abs() <= 1 && (center.y - 150).abs() <= 1, "{center:?}");
    assert!((state.center_estimated().x - center.x).abs() <= 1);
    assert!((state.center_estimated().y - center.y).abs() <= 1);
    assert!((state.center_predicted().x - center.x).abs() <= 1);
}

#[test]
fn test_upright_and_horizontal_hands() {
    let mut tracker = HandTracker::new(&Config::default(), &FixedPosition::new(200.0, 150.0)).unwrap();

    let upright = ellipse_mask(400, 300, 200.0, 150.0, 100.0, 30.0, 90.0);
    let angle = tracker.update(&upright).angle();
    assert!((angle - 90.0).abs() < 5.0, "{angle}");

    let horizontal = ellipse_mask(400, 300, 200.0, 150.0, 100.0, 30.0, 0.0);
    let angle = tracker.update(&horizontal).angle();
    assert!(angle < 5.0 || angle > 175.0, "{angle}");
}
