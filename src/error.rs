//! Error types for the hand tracking library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or buffer operation failed
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Degenerate geometry (sentinel radius, non-finite coordinates, ...)
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Estimator update could not be computed
    #[error("Filter error: {0}")]
    Filter(String),

    /// Pointer query against the X11 server failed
    #[error("Pointer probe error: {0}")]
    Pointer(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
