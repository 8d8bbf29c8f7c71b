//! Initial position probes for seeding the position estimator.
//!
//! The tracker only needs one position, once, at construction and on
//! reinitialization. The X11 probe reads the current pointer location the way
//! a desktop session would report it; it never moves the pointer.

use crate::{geometry::Point2f, Error, Result};
use log::{debug, info};
use x11rb::{
    connection::Connection,
    protocol::xproto::{ConnectionExt, Window},
    rust_connection::RustConnection,
};

/// Source of the initial hand position
pub trait PositionProbe {
    /// Current position, in pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source cannot be read
    fn position(&self) -> Result<Point2f>;

    /// Probe name for logging
    fn name(&self) -> &str;
}

/// Always reports the same position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedPosition(pub Point2f);

impl FixedPosition {
    /// Create a probe reporting `(x, y)`
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(Point2f { x, y })
    }
}

impl PositionProbe for FixedPosition {
    fn position(&self) -> Result<Point2f> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Reports the centre of a screen of the given size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenCenter {
    /// Screen width in pixels
    pub width: u32,
    /// Screen height in pixels
    pub height: u32,
}

impl PositionProbe for ScreenCenter {
    fn position(&self) -> Result<Point2f> {
        Ok(Point2f::new(f64::from(self.width / 2), f64::from(self.height / 2)))
    }

    fn name(&self) -> &str {
        "center"
    }
}

/// Reads the pointer position from the X11 server
pub struct PointerProbe {
    connection: RustConnection,
    root: Window,
    screen_width: u16,
    screen_height: u16,
}

impl PointerProbe {
    /// Connect to the display named by `$DISPLAY`
    ///
    /// # Errors
    ///
    /// Returns `Pointer` if the X11 server cannot be reached
    pub fn connect() -> Result<Self> {
        let (connection, screen_num) =
            RustConnection::connect(None).map_err(|e| Error::Pointer(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::Pointer("Failed to get screen".to_string()))?;
        let root = screen.root;
        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!("Connected to X11 display, screen: {}x{}", screen_width, screen_height);

        Ok(Self {
            connection,
            root,
            screen_width,
            screen_height,
        })
    }

    /// Screen dimensions reported by the server
    #[must_use]
    pub const fn screen_size(&self) -> (u16, u16) {
        (self.screen_width, self.screen_height)
    }
}

impl PositionProbe for PointerProbe {
    fn position(&self) -> Result<Point2f> {
        let reply = self
            .connection
            .query_pointer(self.root)
            .map_err(|e| Error::Pointer(format!("Failed to send query pointer: {e}")))?
            .reply()
            .map_err(|e| Error::Pointer(format!("Failed to query pointer: {e}")))?;

        debug!("Pointer at ({}, {})", reply.root_x, reply.root_y);
        Ok(Point2f::new(f64::from(reply.root_x), f64::from(reply.root_y)))
    }

    fn name(&self) -> &str {
        "pointer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_position() {
        let probe = FixedPosition::new(12.0, 34.0);
        assert_eq!(probe.position().unwrap(), Point2f::new(12.0, 34.0));
        assert_eq!(probe.name(), "fixed");
    }

    #[test]
    fn test_screen_center_truncates() {
        let probe = ScreenCenter { width: 1921, height: 1081 };
        assert_eq!(probe.position().unwrap(), Point2f::new(960.0, 540.0));
    }

    #[test]
    fn test_probe_as_trait_object() {
        let probes: Vec<Box<dyn PositionProbe>> = vec![
            Box::new(FixedPosition::default()),
            Box::new(ScreenCenter { width: 640, height: 480 }),
        ];
        let names: Vec<&str> = probes.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["fixed", "center"]);
    }

    #[test]
    #[ignore] // Requires X11 display
    fn test_pointer_probe() {
        let probe = PointerProbe::connect().unwrap();
        let (w, h) = probe.screen_size();
        let p = probe.position().unwrap();
        assert!(p.x >= 0.0 && p.x < f64::from(w));
        assert!(p.y >= 0.0 && p.y < f64::from(h));
    }
}
