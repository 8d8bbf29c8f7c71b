//! Configuration management for the hand tracker

use crate::{
    constants::{
        DEFAULT_APPROX_EPSILON, DEFAULT_INITIAL_ANGLE, DEFAULT_INITIAL_ERROR_COVARIANCE, DEFAULT_MEASUREMENT_NOISE,
        DEFAULT_MIN_CONTOUR_POINTS, DEFAULT_PALM_SEARCH_RATIO, DEFAULT_PROCESS_NOISE, DEFAULT_ROI_HALF_SIDE_FACTOR,
    },
    probe::{FixedPosition, PointerProbe, PositionProbe, ScreenCenter},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tracker configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Contour extraction
    pub contour: ContourConfig,

    /// Palm circle search
    pub palm: PalmConfig,

    /// Refinement window around the palm
    pub roi: RoiConfig,

    /// Kalman noise levels and orientation prior
    pub estimator: EstimatorConfig,

    /// Initial position probe
    pub probe: ProbeConfig,
}

/// Contour extraction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Boundaries with this many vertices or fewer are dropped
    pub min_points: usize,

    /// Polygon approximation tolerance in pixels
    pub approx_epsilon: f64,
}

/// Palm search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PalmConfig {
    /// Search window covers `1/ratio .. 1 - 1/ratio` of the bounding box
    pub search_ratio: u32,
}

/// Refinement window parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiConfig {
    /// Half side of the window in palm radii
    pub half_side_factor: f64,
}

/// Estimator parameters, shared by orientation and position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Orientation prior in degrees
    pub initial_angle: f64,

    /// Diagonal of Q
    pub process_noise: f64,

    /// Diagonal of R
    pub measurement_noise: f64,

    /// Diagonal of the initial P
    pub initial_error_covariance: f64,
}

/// Kind of initial position probe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// Fixed `(x, y)`
    #[default]
    Fixed,
    /// Centre of a `screen_width` × `screen_height` screen
    Center,
    /// X11 pointer position
    Pointer,
}

/// Initial position probe configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Probe kind
    pub kind: ProbeKind,

    /// X for the fixed probe
    pub x: f64,

    /// Y for the fixed probe
    pub y: f64,

    /// Screen width for the centre probe
    pub screen_width: u32,

    /// Screen height for the centre probe
    pub screen_height: u32,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            min_points: DEFAULT_MIN_CONTOUR_POINTS,
            approx_epsilon: DEFAULT_APPROX_EPSILON,
        }
    }
}

impl Default for PalmConfig {
    fn default() -> Self {
        Self {
            search_ratio: DEFAULT_PALM_SEARCH_RATIO,
        }
    }
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            half_side_factor: DEFAULT_ROI_HALF_SIDE_FACTOR,
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            initial_angle: DEFAULT_INITIAL_ANGLE,
            process_noise: DEFAULT_PROCESS_NOISE,
            measurement_noise: DEFAULT_MEASUREMENT_NOISE,
            initial_error_covariance: DEFAULT_INITIAL_ERROR_COVARIANCE,
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            kind: ProbeKind::Fixed,
            x: 0.0,
            y: 0.0,
            screen_width: 640,
            screen_height: 480,
        }
    }
}

fn positive(value: f64, name: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::ConfigError(format!("{name} must be positive and finite, got {value}")))
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `ConfigError` if it does
    /// not parse
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text does not parse
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Build the configured initial position probe
    ///
    /// # Errors
    ///
    /// Returns `Pointer` if the X11 probe cannot connect
    pub fn create_probe(&self) -> Result<Box<dyn PositionProbe>> {
        match self.probe.kind {
            ProbeKind::Fixed => Ok(Box::new(FixedPosition::new(self.probe.x, self.probe.y))),
            ProbeKind::Center => Ok(Box::new(ScreenCenter {
                width: self.probe.screen_width,
                height: self.probe.screen_height,
            })),
            ProbeKind::Pointer => Ok(Box::new(PointerProbe::connect()?)),
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        positive(self.contour.approx_epsilon, "contour.approx_epsilon")?;

        // Below 3 the search window would be empty or cover the whole box
        if self.palm.search_ratio < 3 {
            return Err(Error::ConfigError(format!(
                "palm.search_ratio must be at least 3, got {}",
                self.palm.search_ratio
            )));
        }

        positive(self.roi.half_side_factor, "roi.half_side_factor")?;

        if !self.estimator.initial_angle.is_finite() {
            return Err(Error::ConfigError("estimator.initial_angle must be finite".to_string()));
        }
        positive(self.estimator.process_noise, "estimator.process_noise")?;
        positive(self.estimator.measurement_noise, "estimator.measurement_noise")?;
        positive(self.estimator.initial_error_covariance, "estimator.initial_error_covariance")?;

        if self.probe.kind == ProbeKind::Fixed && !(self.probe.x.is_finite() && self.probe.y.is_finite()) {
            return Err(Error::ConfigError("probe.x and probe.y must be finite".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Tracking Configuration

# Contour extraction
contour:
  min_points: 50
  approx_epsilon: 3.0

# Palm (inscribed circle) search
palm:
  search_ratio: 3

# Refinement window around the palm, in palm radii
roi:
  half_side_factor: 3.5

# Kalman estimators
estimator:
  initial_angle: 90.0
  process_noise: 0.0001
  measurement_noise: 0.1
  initial_error_covariance: 0.1

# Initial position probe (fixed, center, pointer)
probe:
  kind: fixed
  x: 0.0
  y: 0.0
  screen_width: 640
  screen_height: 480
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed = Config::from_yaml("roi:\n  half_side_factor: 2.0\n").unwrap();
        assert_eq!(parsed.roi.half_side_factor, 2.0);
        assert_eq!(parsed.contour, ContourConfig::default());
        assert_eq!(parsed.estimator, EstimatorConfig::default());
    }

    #[test]
    fn test_validation_failures() {
        let mut config = Config::default();
        config.palm.search_ratio = 2;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

        let mut config = Config::default();
        config.contour.approx_epsilon = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.roi.half_side_factor = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.estimator.measurement_noise = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_probe_kind_names() {
        let parsed = Config::from_yaml("probe:\n  kind: center\n  screen_width: 800\n  screen_height: 600\n").unwrap();
        assert_eq!(parsed.probe.kind, ProbeKind::Center);
        let probe = parsed.create_probe().unwrap();
        assert_eq!(probe.position().unwrap().x, 400.0);

        assert!(Config::from_yaml("probe:\n  kind: joystick\n").is_err());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("hand_tracking_config_{}.yaml", std::process::id()));
        let mut config = Config::default();
        config.contour.min_points = 80;
        config.to_file(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
