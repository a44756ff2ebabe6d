//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like FFmpeg, X11 and ALSA tools,
//! the terminal and the config file.

pub mod config;
pub mod probe;
pub mod prompt;
pub mod runner;
pub mod tools;

// Re-export adapters
pub use config::XdgConfigStore;
pub use probe::{create_probe, LinuxDeviceProbe, MacDeviceProbe};
pub use prompt::TerminalPrompter;
pub use runner::FfmpegRunner;
pub use tools::WhichToolLocator;
