//! Device selection value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::{DeviceSelectionError, SelectionParseError};

use super::{CaptureDevice, DeviceKind};

/// How the user wants a device kind to be chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceSelection {
    /// Do not capture this kind
    #[default]
    Off,
    /// Ask interactively when there is more than one device
    Prompt,
    /// Use the device at this position
    Index(usize),
}

/// Result of applying a selection to a device list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Skip,
    Device(usize),
    Ask,
}

impl DeviceSelection {
    pub fn is_off(&self) -> bool {
        matches!(self, DeviceSelection::Off)
    }

    /// Apply the selection to the devices probed for `kind`.
    ///
    /// `Prompt` only asks when there is a real choice to make.
    pub fn pick(&self, kind: DeviceKind, devices: &[CaptureDevice]) -> Result<Pick, DeviceSelectionError> {
        match self {
            DeviceSelection::Off => Ok(Pick::Skip),
            _ if devices.is_empty() => Err(DeviceSelectionError::NoDevices(kind)),
            DeviceSelection::Index(index) if *index < devices.len() => Ok(Pick::Device(*index)),
            DeviceSelection::Index(index) => Err(DeviceSelectionError::OutOfRange {
                kind,
                index: *index,
                max: devices.len() - 1,
            }),
            DeviceSelection::Prompt if devices.len() == 1 => Ok(Pick::Device(0)),
            DeviceSelection::Prompt => Ok(Pick::Ask),
        }
    }
}

impl FromStr for DeviceSelection {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        match input.as_str() {
            "off" | "none" | "false" | "no" => Ok(DeviceSelection::Off),
            "" | "prompt" | "ask" => Ok(DeviceSelection::Prompt),
            digits if digits.chars().all(|c| c.is_ascii_digit()) => digits
                .parse()
                .map(DeviceSelection::Index)
                .map_err(|_| SelectionParseError { input: s.to_string() }),
            _ => Err(SelectionParseError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for DeviceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceSelection::Off => write!(f, "off"),
            DeviceSelection::Prompt => write!(f, "prompt"),
            DeviceSelection::Index(index) => write!(f, "{}", index),
        }
    }
}
