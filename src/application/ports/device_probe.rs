//! Device discovery port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::device::{CaptureDevice, DeviceKind};

/// Errors while enumerating devices
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    #[error("'{tool}' is required to list {kind} devices but was not found. {hint}")]
    ToolMissing {
        tool: String,
        kind: DeviceKind,
        hint: String,
    },

    #[error("'{tool}' failed: {message}")]
    CommandFailed { tool: String, message: String },

    #[error("No X display available (DISPLAY is not set). Screen capture needs X11 or XWayland")]
    NoDisplay,
}

/// Port for enumerating capture devices on this machine
#[async_trait]
pub trait DeviceProbe: Send + Sync {
    /// Screens (or monitors) that can be grabbed
    async fn screens(&self) -> Result<Vec<CaptureDevice>, ProbeError>;

    /// Microphones and other audio inputs
    async fn microphones(&self) -> Result<Vec<CaptureDevice>, ProbeError>;

    /// Video cameras
    async fn cameras(&self) -> Result<Vec<CaptureDevice>, ProbeError>;

    /// Devices of a single kind
    async fn devices(&self, kind: DeviceKind) -> Result<Vec<CaptureDevice>, ProbeError> {
        match kind {
            DeviceKind::Screen => self.screens().await,
            DeviceKind::Audio => self.microphones().await,
            DeviceKind::Camera => self.cameras().await,
        }
    }
}

#[async_trait]
impl DeviceProbe for Box<dyn DeviceProbe> {
    async fn screens(&self) -> Result<Vec<CaptureDevice>, ProbeError> {
        (**self).screens().await
    }

    async fn microphones(&self) -> Result<Vec<CaptureDevice>, ProbeError> {
        (**self).microphones().await
    }

    async fn cameras(&self) -> Result<Vec<CaptureDevice>, ProbeError> {
        (**self).cameras().await
    }
}
