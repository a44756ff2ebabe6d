//! Capture device value objects

use std::fmt;

use serde::Serialize;

/// Kind of capture source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Screen,
    Audio,
    Camera,
}

impl DeviceKind {
    /// All kinds in probing order
    pub const ALL: [DeviceKind; 3] = [DeviceKind::Screen, DeviceKind::Audio, DeviceKind::Camera];

    /// Short flag selecting this kind on the command line
    pub const fn flag(&self) -> char {
        match self {
            DeviceKind::Screen => 's',
            DeviceKind::Audio => 'a',
            DeviceKind::Camera => 'c',
        }
    }

    /// Heading used when listing devices of this kind
    pub const fn title(&self) -> &'static str {
        match self {
            DeviceKind::Screen => "Screen devices",
            DeviceKind::Audio => "Audio devices",
            DeviceKind::Camera => "Camera devices",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Screen => write!(f, "screen"),
            DeviceKind::Audio => write!(f, "audio"),
            DeviceKind::Camera => write!(f, "camera"),
        }
    }
}

/// Screen area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl Geometry {
    pub const fn new(width: u32, height: u32, x: i32, y: i32) -> Self {
        Self {
            width,
            height,
            x,
            y,
        }
    }

    /// Size in the form x11grab expects for `-video_size`
    pub fn video_size(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}

/// A capture source discovered on this machine.
///
/// `index` is the position within its kind and is what users pass to
/// `-s`, `-a` or `-c`. `input` is the value handed to ffmpeg's `-i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureDevice {
    pub kind: DeviceKind,
    pub index: usize,
    pub name: String,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
}

impl CaptureDevice {
    pub fn new(kind: DeviceKind, index: usize, name: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            name: name.into(),
            input: input.into(),
            geometry: None,
        }
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// One-line description for listings and prompts
    pub fn describe(&self) -> String {
        match self.geometry {
            Some(geometry) => format!("{} ({}) [{}]", self.name, geometry, self.input),
            None => format!("{} [{}]", self.name, self.input),
        }
    }
}

/// Devices found by a probe, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceInventory {
    pub screens: Vec<CaptureDevice>,
    pub audio: Vec<CaptureDevice>,
    pub cameras: Vec<CaptureDevice>,
}

impl DeviceInventory {
    pub fn of(&self, kind: DeviceKind) -> &[CaptureDevice] {
        match kind {
            DeviceKind::Screen => &self.screens,
            DeviceKind::Audio => &self.audio,
            DeviceKind::Camera => &self.cameras,
        }
    }

    pub fn set(&mut self, kind: DeviceKind, devices: Vec<CaptureDevice>) {
        match kind {
            DeviceKind::Screen => self.screens = devices,
            DeviceKind::Audio => self.audio = devices,
            DeviceKind::Camera => self.cameras = devices,
        }
    }
}
