//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::command::{DEFAULT_EXTENSION, DEFAULT_FRAMERATE};
use crate::domain::device::{DeviceKind, DeviceSelection};
use crate::domain::error::SelectionParseError;

/// Default video encoder options: lossless and cheap enough to keep up live
pub const DEFAULT_SCREEN_ARGS: &str = "-c:v libx264 -crf 0 -preset ultrafast";

/// Default audio encoder options
pub const DEFAULT_AUDIO_ARGS: &str = "-c:a pcm_s16le";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub screen: Option<String>,
    pub audio: Option<String>,
    pub camera: Option<String>,
    pub screen_args: Option<String>,
    pub audio_args: Option<String>,
    pub camera_args: Option<String>,
    pub output_args: Option<String>,
    pub extension: Option<String>,
    pub framerate: Option<u32>,
    pub output_dir: Option<String>,
    pub ffmpeg: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            screen: Some(DeviceSelection::Prompt.to_string()),
            audio: Some(DeviceSelection::Off.to_string()),
            camera: Some(DeviceSelection::Off.to_string()),
            screen_args: Some(DEFAULT_SCREEN_ARGS.to_string()),
            audio_args: Some(DEFAULT_AUDIO_ARGS.to_string()),
            camera_args: None,
            output_args: None,
            extension: Some(DEFAULT_EXTENSION.to_string()),
            framerate: Some(DEFAULT_FRAMERATE),
            output_dir: None,
            ffmpeg: Some("ffmpeg".to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            screen: other.screen.or(self.screen),
            audio: other.audio.or(self.audio),
            camera: other.camera.or(self.camera),
            screen_args: other.screen_args.or(self.screen_args),
            audio_args: other.audio_args.or(self.audio_args),
            camera_args: other.camera_args.or(self.camera_args),
            output_args: other.output_args.or(self.output_args),
            extension: other.extension.or(self.extension),
            framerate: other.framerate.or(self.framerate),
            output_dir: other.output_dir.or(self.output_dir),
            ffmpeg: other.ffmpeg.or(self.ffmpeg),
        }
    }

    /// Raw selection string for a device kind
    pub fn selection_value(&self, kind: DeviceKind) -> Option<&str> {
        match kind {
            DeviceKind::Screen => self.screen.as_deref(),
            DeviceKind::Audio => self.audio.as_deref(),
            DeviceKind::Camera => self.camera.as_deref(),
        }
    }

    /// Parsed selection for a device kind.
    /// Screens are prompted for when unset, microphones and cameras are off.
    pub fn selection(&self, kind: DeviceKind) -> Result<DeviceSelection, SelectionParseError> {
        match self.selection_value(kind) {
            Some(value) => value.parse(),
            None if kind == DeviceKind::Screen => Ok(DeviceSelection::Prompt),
            None => Ok(DeviceSelection::Off),
        }
    }

    pub fn screen_args_or_default(&self) -> &str {
        self.screen_args.as_deref().unwrap_or(DEFAULT_SCREEN_ARGS)
    }

    pub fn audio_args_or_default(&self) -> &str {
        self.audio_args.as_deref().unwrap_or(DEFAULT_AUDIO_ARGS)
    }

    pub fn camera_args_or_default(&self) -> &str {
        self.camera_args.as_deref().unwrap_or("")
    }

    pub fn output_args_or_default(&self) -> &str {
        self.output_args.as_deref().unwrap_or("")
    }

    pub fn extension_or_default(&self) -> &str {
        self.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }

    /// Framerate, or the default when unset or zero
    pub fn framerate_or_default(&self) -> u32 {
        self.framerate.filter(|f| *f > 0).unwrap_or(DEFAULT_FRAMERATE)
    }

    /// Output directory with a leading `~/` expanded
    pub fn output_dir_or_default(&self) -> Option<PathBuf> {
        self.output_dir.as_deref().map(expand_home)
    }

    pub fn ffmpeg_or_default(&self) -> &str {
        self.ffmpeg.as_deref().unwrap_or("ffmpeg")
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if path == "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    }
}
