//! Replay application: runs the tracker over a directory of mask images.

use crate::{
    error::Result,
    hand::{HandState, HandTracker},
    utils::image_conversion::to_binary_mask,
    Error,
};
use log::{debug, info, warn};
use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Instant,
};

/// File extensions recognised as mask images
const MASK_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "pgm", "ppm", "pnm"];

/// Replay settings
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Directory holding one mask image per frame
    pub masks_dir: PathBuf,
    /// Binarisation threshold
    pub threshold: u8,
    /// Print each frame's state as YAML
    pub dump: bool,
}

/// Result of a replay run
#[derive(Debug, Clone)]
pub struct ReplaySummary {
    /// Frames processed
    pub frames: usize,
    /// Frames in which a hand was found
    pub found: usize,
    /// Frames that could not be decoded
    pub skipped: usize,
    /// State after the last frame
    pub last_state: HandState,
}

/// Feeds mask files to a [`HandTracker`] in file-name order
pub struct ReplayApp {
    config: ReplayConfig,
    tracker: HandTracker,
}

impl ReplayApp {
    /// Create a replay over `config.masks_dir`
    #[must_use]
    pub const fn new(config: ReplayConfig, tracker: HandTracker) -> Self {
        Self { config, tracker }
    }

    /// Tracker driven by the replay
    #[must_use]
    pub const fn tracker(&self) -> &HandTracker {
        &self.tracker
    }

    /// Mask files of `dir`, sorted by file name
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory cannot be read
    pub fn list_masks(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_mask = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| MASK_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            if path.is_file() && is_mask {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Run the replay, writing YAML dumps (if enabled) to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if the directory holds no masks or cannot be read,
    /// or if writing a dump fails. Undecodable files are skipped.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<ReplaySummary> {
        let files = Self::list_masks(&self.config.masks_dir)?;
        if files.is_empty() {
            return Err(Error::InvalidInput(format!(
                "No mask images found in {}",
                self.config.masks_dir.display()
            )));
        }

        info!("Replaying {} masks from {}", files.len(), self.config.masks_dir.display());
        let start_time = Instant::now();

        let mut frames = 0;
        let mut found = 0;
        let mut skipped = 0;

        for path in &files {
            let image = match image::open(path) {
                Ok(image) => image,
                Err(e) => {
                    warn!("Skipping {}: {e}", path.display());
                    skipped += 1;
                    continue;
                }
            };

            let mask = to_binary_mask(&image, self.config.threshold);
            let state = self.tracker.update_with_frame(&image, &mask)?;
            frames += 1;
            if state.found() {
                found += 1;
            }
            debug!("{}: found = {}", path.display(), state.found());

            if self.config.dump {
                let yaml = serde_yaml::to_string(state)
                    .map_err(|e| Error::InvalidInput(format!("Failed to serialize hand state: {e}")))?;
                writeln!(out, "# {}", path.display())?;
                writeln!(out, "{yaml}")?;
            }
        }

        let elapsed = start_time.elapsed().as_secs_f64();
        info!(
            "Replay finished: {} frames, hand found in {}, {} skipped, {:.1} fps",
            frames,
            found,
            skipped,
            if elapsed > 0.0 { frames as f64 / elapsed } else { 0.0 }
        );

        Ok(ReplaySummary {
            frames,
            found,
            skipped,
            last_state: self.tracker.state().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, probe::FixedPosition};
    use image::{GrayImage, Luma};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hand_tracking_{name}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn replay(dir: &Path, dump: bool) -> ReplayApp {
        let tracker = HandTracker::new(&Config::default(), &FixedPosition::new(100.0, 100.0)).unwrap();
        ReplayApp::new(
            ReplayConfig {
                masks_dir: dir.to_path_buf(),
                threshold: 127,
                dump,
            },
            tracker,
        )
    }

    #[test]
    fn test_list_masks_sorted_and_filtered() {
        let dir = temp_dir("list");
        for name in ["b.png", "a.png", "notes.txt", "c.PGM"] {
            std::fs::write(dir.join(name), b"").unwrap();
        }
        let files = ReplayApp::list_masks(&dir).unwrap();
        let names: Vec<_> = files.iter().filter_map(|p| p.file_name()?.to_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.PGM"]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = temp_dir("empty");
        let mut app = replay(&dir, false);
        assert!(app.run(&mut Vec::new()).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_replay_counts_frames() {
        let dir = temp_dir("run");
        let disk = GrayImage::from_fn(200, 200, |x, y| {
            let (dx, dy) = (f64::from(x) - 100.0, f64::from(y) - 100.0);
            if dx * dx + dy * dy <= 50.0 * 50.0 {
                Luma([255])
            } else {
                Luma([0])
            }
        });
        disk.save(dir.join("000.png")).unwrap();
        GrayImage::new(200, 200).save(dir.join("001.png")).unwrap();
        disk.save(dir.join("002.png")).unwrap();
        std::fs::write(dir.join("003.png"), b"not an image").unwrap();

        let mut out = Vec::new();
        let summary = replay(&dir, true).run(&mut out).unwrap();
        assert_eq!(summary.frames, 3);
        assert_eq!(summary.found, 2);
        assert_eq!(summary.skipped, 1);
        assert!(summary.last_state.found());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("found: true"));
        assert!(text.contains("found: false"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
