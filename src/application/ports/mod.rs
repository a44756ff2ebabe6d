//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod device_probe;
pub mod prompter;
pub mod runner;
pub mod tools;

// Re-export common types
pub use config::ConfigStore;
pub use device_probe::{DeviceProbe, ProbeError};
pub use prompter::{PromptError, Prompter};
pub use runner::{CommandRunner, RunError, RunOutcome};
pub use tools::ToolLocator;
