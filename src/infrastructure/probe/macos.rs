//! macOS device probe via ffmpeg's avfoundation listing

use async_trait::async_trait;

use crate::application::ports::{DeviceProbe, ProbeError, ToolLocator};
use crate::domain::device::{CaptureDevice, DeviceKind};

use super::parsers::{parse_avfoundation_devices, AvFoundationDevices};
use super::{missing_tool, run_tool};

/// Asks ffmpeg itself which avfoundation devices exist
pub struct MacDeviceProbe<L: ToolLocator> {
    locator: L,
    ffmpeg: String,
}

impl<L: ToolLocator> MacDeviceProbe<L> {
    pub fn new(locator: L, ffmpeg: &str) -> Self {
        Self {
            locator,
            ffmpeg: ffmpeg.to_string(),
        }
    }

    async fn list(&self, kind: DeviceKind) -> Result<AvFoundationDevices, ProbeError> {
        if !self.locator.is_available(&self.ffmpeg).await {
            return Err(missing_tool(&self.ffmpeg, kind));
        }

        // ffmpeg always exits non-zero here since there is no real input
        let output = run_tool(
            &self.ffmpeg,
            &["-hide_banner", "-f", "avfoundation", "-list_devices", "true", "-i", ""],
            kind,
        )
        .await?;

        let devices = parse_avfoundation_devices(&output.stderr);
        if devices == AvFoundationDevices::default() && !output.stderr.contains("AVFoundation") {
            return Err(ProbeError::CommandFailed {
                tool: self.ffmpeg.clone(),
                message: output.error_line(),
            });
        }

        Ok(devices)
    }
}

#[async_trait]
impl<L: ToolLocator> DeviceProbe for MacDeviceProbe<L> {
    async fn screens(&self) -> Result<Vec<CaptureDevice>, ProbeError> {
        Ok(self.list(DeviceKind::Screen).await?.screens)
    }

    async fn microphones(&self) -> Result<Vec<CaptureDevice>, ProbeError> {
        Ok(self.list(DeviceKind::Audio).await?.audio)
    }

    async fn cameras(&self) -> Result<Vec<CaptureDevice>, ProbeError> {
        Ok(self.list(DeviceKind::Camera).await?.cameras)
    }
}
