//! Probe selection per platform

use crate::application::ports::DeviceProbe;
use crate::domain::platform::Platform;
use crate::infrastructure::tools::WhichToolLocator;

use super::{LinuxDeviceProbe, MacDeviceProbe};

/// Create the device probe for `platform`.
/// `ffmpeg` is the encoder binary, which lists devices itself on macOS.
pub fn create_probe(platform: Platform, ffmpeg: &str) -> Box<dyn DeviceProbe> {
    match platform {
        Platform::Linux => Box::new(LinuxDeviceProbe::new(WhichToolLocator::new())),
        Platform::MacOs => Box::new(MacDeviceProbe::new(WhichToolLocator::new(), ffmpeg)),
    }
}
