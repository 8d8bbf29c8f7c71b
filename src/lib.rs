//! Hand tracking library: geometric hand description from binary skin masks.
//!
//! Each frame goes through:
//! 1. Contour extraction from the skin mask
//! 2. Region description (bounding boxes, palm and enclosing circles, hull,
//!    convexity defects)
//! 3. Refinement inside a window around the palm
//! 4. Kalman filtering of the hand orientation and position
//!
//! # Examples
//!
//! ## Tracking a mask sequence
//!
//! ```no_run
//! use hand_tracking::{config::Config, hand::HandTracker, probe::FixedPosition};
//! use hand_tracking::utils::image_conversion::to_binary_mask;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let mut tracker = HandTracker::new(&config, &FixedPosition::new(320.0, 240.0))?;
//!
//! for path in ["mask_000.png", "mask_001.png"] {
//!     let mask = to_binary_mask(&image::open(path)?, 127);
//!     let state = tracker.update(&mask);
//!     if state.found() {
//!         println!(
//!             "angle {:.1} (filtered {:.1}), centre {:?} (filtered {:?})",
//!             state.angle(),
//!             state.angle_estimated(),
//!             state.center(),
//!             state.center_estimated()
//!         );
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Describing a single contour
//!
//! ```
//! use hand_tracking::{contour::ContourExtractor, region::RegionDescriptor};
//! use image::{GrayImage, Luma};
//!
//! let mask = GrayImage::from_fn(200, 200, |x, y| {
//!     let (dx, dy) = (f64::from(x) - 100.0, f64::from(y) - 100.0);
//!     if dx * dx + dy * dy <= 60.0 * 60.0 { Luma([255]) } else { Luma([0]) }
//! });
//!
//! let contour = ContourExtractor::default().extract(&mask).expect("disk has a contour");
//! let description = RegionDescriptor::default().describe(&contour).expect("valid contour");
//! assert!(description.palm.is_some());
//! assert!(description.convexity_defects.len() < contour.len());
//! ```

/// Geometric primitives and measurements
pub mod geometry;

/// Contour extraction from binary masks
pub mod contour;

/// Bounding regions, palm circle and hull of a contour
pub mod region;

/// Palm window refinement
pub mod roi;

/// Kalman estimators for orientation and position
pub mod filters;

/// Initial position probes
pub mod probe;

/// Hand state and per-frame tracking pipeline
pub mod hand;

/// Utility functions for masks and pixel coordinates
pub mod utils;

/// Error types and result handling
pub mod error;

/// Mask replay application
pub mod app;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
pub use hand::{HandState, HandTracker};
