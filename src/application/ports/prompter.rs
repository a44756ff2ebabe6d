//! Interactive device choice port

use thiserror::Error;

use crate::domain::device::{CaptureDevice, DeviceKind};

/// Prompt errors
#[derive(Debug, Clone, Error)]
pub enum PromptError {
    #[error("Several {kind} devices found but input is not interactive. Pass -{flag}<N> to pick one (see --list)")]
    NotInteractive { kind: DeviceKind, flag: char },

    #[error("Device selection aborted")]
    Aborted,

    #[error("Failed to read selection: {0}")]
    Io(String),
}

/// Port for asking the user which device to use
pub trait Prompter: Send + Sync {
    /// Ask for one of `devices` and return its position
    fn choose(&self, kind: DeviceKind, devices: &[CaptureDevice]) -> Result<usize, PromptError>;
}
