//! Capture device domain

mod capture_device;
mod selection;

pub use capture_device::{CaptureDevice, DeviceInventory, DeviceKind, Geometry};
pub use selection::{DeviceSelection, Pick};
