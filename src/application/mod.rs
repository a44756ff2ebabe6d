//! Application layer - Use cases and port interfaces
//!
//! Contains the capture workflow, device listing, the requirement check
//! and trait definitions for external system interactions.

pub mod capture;
pub mod check;
pub mod list;
pub mod ports;

// Re-export use cases
pub use capture::{CaptureCallbacks, CaptureError, CaptureInput, CaptureOutcome, CaptureUseCase};
pub use check::{all_required_available, check_requirements, install_hint, Requirement};
pub use list::{list_devices, ListReport};
