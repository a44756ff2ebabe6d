//! Domain layer - Core business logic
//!
//! Contains value objects and domain errors: capture devices, selections,
//! configuration and the ffmpeg command builder.
//! This layer has no dependencies on external systems.

pub mod command;
pub mod config;
pub mod device;
pub mod error;
pub mod platform;

// Re-export common types
pub use command::{CaptureCommand, CapturePlan, Extension};
pub use config::AppConfig;
pub use device::{CaptureDevice, DeviceInventory, DeviceKind, DeviceSelection, Geometry};
pub use error::*;
pub use platform::{DisplayServer, Platform};
