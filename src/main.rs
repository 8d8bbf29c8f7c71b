//! Hand tracking replay over a directory of skin masks.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hand_tracking::{
    app::{ReplayApp, ReplayConfig},
    config::{Config, ProbeKind, EXAMPLE_CONFIG},
    constants::DEFAULT_MASK_THRESHOLD,
    hand::HandTracker,
};
use log::{info, warn};
use std::path::PathBuf;

/// Initial position source
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProbeArg {
    /// Fixed position from --initial-x / --initial-y
    Fixed,
    /// Centre of the configured screen size
    Center,
    /// Current X11 pointer position
    Pointer,
}

impl From<ProbeArg> for ProbeKind {
    fn from(arg: ProbeArg) -> Self {
        match arg {
            ProbeArg::Fixed => Self::Fixed,
            ProbeArg::Center => Self::Center,
            ProbeArg::Pointer => Self::Pointer,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory of mask images, processed in file-name order
    #[arg(short, long, required_unless_present = "print_config")]
    masks: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Initial position probe (overrides the configuration)
    #[arg(short, long, value_enum)]
    probe: Option<ProbeArg>,

    /// Initial x position for the fixed probe
    #[arg(long)]
    initial_x: Option<f64>,

    /// Initial y position for the fixed probe
    #[arg(long)]
    initial_y: Option<f64>,

    /// Pixels brighter than this are skin
    #[arg(short, long, default_value_t = DEFAULT_MASK_THRESHOLD)]
    threshold: u8,

    /// Print the hand state of every frame as YAML
    #[arg(long)]
    dump: bool,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(probe) = args.probe {
        config.probe.kind = probe.into();
    }
    if let Some(x) = args.initial_x {
        config.probe.x = x;
    }
    if let Some(y) = args.initial_y {
        config.probe.y = y;
    }
    config.validate().context("Invalid configuration")?;

    let probe = config.create_probe().context("Failed to create position probe")?;
    let tracker = HandTracker::new(&config, probe.as_ref())?;

    let masks_dir = args.masks.context("--masks is required")?;
    let mut app = ReplayApp::new(
        ReplayConfig {
            masks_dir,
            threshold: args.threshold,
            dump: args.dump,
        },
        tracker,
    );

    let mut stdout = std::io::stdout().lock();
    let summary = app.run(&mut stdout)?;

    let last = &summary.last_state;
    if last.found() {
        info!(
            "Last frame: angle {:.1} (filtered {:.1}), centre ({}, {}) (filtered ({}, {}))",
            last.angle(),
            last.angle_estimated(),
            last.center().x,
            last.center().y,
            last.center_estimated().x,
            last.center_estimated().y
        );
    }

    Ok(())
}
