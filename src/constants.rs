//! Constants used throughout the tracker

/// Boundaries with this many vertices or fewer are treated as noise
pub const DEFAULT_MIN_CONTOUR_POINTS: usize = 50;

/// Maximum deviation (pixels) tolerated by the polygon approximation
pub const DEFAULT_APPROX_EPSILON: f64 = 3.0;

/// Palm search covers the central `1/ratio .. 1 - 1/ratio` part of the bounding box
pub const DEFAULT_PALM_SEARCH_RATIO: u32 = 3;

/// Half side of the refinement window, in palm radii
pub const DEFAULT_ROI_HALF_SIDE_FACTOR: f64 = 3.5;

/// Radius reported when the inscribed circle search finds no interior point
pub const PALM_RADIUS_NOT_FOUND: f64 = -1.0;

/// Orientation prior (degrees); an upright hand
pub const DEFAULT_INITIAL_ANGLE: f64 = 90.0;

/// Diagonal of the process noise covariance
pub const DEFAULT_PROCESS_NOISE: f64 = 1e-4;

/// Diagonal of the measurement noise covariance
pub const DEFAULT_MEASUREMENT_NOISE: f64 = 0.1;

/// Diagonal of the initial a-posteriori error covariance
pub const DEFAULT_INITIAL_ERROR_COVARIANCE: f64 = 0.1;

/// Default binarisation threshold for mask images loaded from disk
pub const DEFAULT_MASK_THRESHOLD: u8 = 127;

/// Foreground value written into generated masks
pub const MASK_FOREGROUND: u8 = 255;
