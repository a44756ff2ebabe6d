//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

use crate::domain::device::{DeviceKind, DeviceSelection};

/// capcast - screen, microphone and camera capture through ffmpeg
#[derive(Parser, Debug)]
#[command(name = "capcast")]
#[command(version)]
#[command(about = "Capture screen, microphone and camera with ffmpeg")]
#[command(long_about = None)]
#[command(group(
    ArgGroup::new("listing")
        .multiple(true)
        .args(["list", "slist", "alist", "clist"])
))]
pub struct Cli {
    /// Screen to capture: index, 'prompt' (bare flag) or 'off'
    #[arg(
        short = 's',
        long,
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "prompt"
    )]
    pub screen: Option<DeviceSelection>,

    /// Video encoder arguments
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub sargs: Option<String>,

    /// Microphone to record: index, 'prompt' (bare flag) or 'off'
    #[arg(
        short = 'a',
        long,
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "prompt"
    )]
    pub audio: Option<DeviceSelection>,

    /// Audio encoder arguments
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub aargs: Option<String>,

    /// Camera to overlay: index, 'prompt' (bare flag) or 'off'
    #[arg(
        short = 'c',
        long,
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "prompt"
    )]
    pub camera: Option<DeviceSelection>,

    /// Camera input arguments (e.g. -video_size 1280x720)
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub cargs: Option<String>,

    /// Extra output arguments, placed before the output file
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub oargs: Option<String>,

    /// Container extension of the output file (e.g. mkv, mp4)
    #[arg(short = 'e', long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Output file (default: "Screencast <date> at <time>.<ext>")
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Capture framerate
    #[arg(short = 'r', long, value_name = "FPS", value_parser = clap::value_parser!(u32).range(1..))]
    pub framerate: Option<u32>,

    /// Print the ffmpeg command instead of running it
    #[arg(long)]
    pub dry: bool,

    /// List all capture devices
    #[arg(long)]
    pub list: bool,

    /// List screens
    #[arg(long)]
    pub slist: bool,

    /// List microphones
    #[arg(long)]
    pub alist: bool,

    /// List cameras
    #[arg(long)]
    pub clist: bool,

    /// Print device lists as JSON
    #[arg(long, requires = "listing")]
    pub json: bool,

    /// Check that the required external tools are installed
    #[arg(long, conflicts_with_all = ["listing", "dry"])]
    pub test: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Device kinds requested by the list flags, in probing order
    pub fn listed_kinds(&self) -> Vec<DeviceKind> {
        if self.list {
            return DeviceKind::ALL.to_vec();
        }

        DeviceKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                DeviceKind::Screen => self.slist,
                DeviceKind::Audio => self.alist,
                DeviceKind::Camera => self.clist,
            })
            .collect()
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "screen",
    "audio",
    "camera",
    "screen_args",
    "audio_args",
    "camera_args",
    "output_args",
    "extension",
    "framerate",
    "output_dir",
    "ffmpeg",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
