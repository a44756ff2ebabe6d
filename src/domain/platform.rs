//! Host platform and display server detection

use std::env;
use std::fmt;

use crate::domain::error::UnsupportedPlatform;

/// Operating systems capcast knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
}

impl Platform {
    /// Platform this binary was built for
    pub fn current() -> Result<Self, UnsupportedPlatform> {
        Self::from_os(env::consts::OS)
    }

    pub fn from_os(os: &str) -> Result<Self, UnsupportedPlatform> {
        match os {
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::MacOs),
            other => Err(UnsupportedPlatform {
                os: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux => write!(f, "Linux"),
            Platform::MacOs => write!(f, "macOS"),
        }
    }
}

/// Linux display server type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    X11,
    /// Wayland session; `DISPLAY` set means XWayland is reachable
    Wayland,
    Unknown,
}

impl DisplayServer {
    pub fn detect() -> Self {
        Self::from_env(
            env::var("WAYLAND_DISPLAY").ok().as_deref(),
            env::var("DISPLAY").ok().as_deref(),
        )
    }

    pub fn from_env(wayland_display: Option<&str>, display: Option<&str>) -> Self {
        let set = |v: Option<&str>| v.is_some_and(|s| !s.is_empty());
        if set(wayland_display) {
            DisplayServer::Wayland
        } else if set(display) {
            DisplayServer::X11
        } else {
            DisplayServer::Unknown
        }
    }
}

/// X display name x11grab connects to
pub fn x11_display() -> Option<String> {
    env::var("DISPLAY").ok().filter(|d| !d.is_empty())
}
