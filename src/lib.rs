//! capcast - screen, microphone and camera capture through ffmpeg
//!
//! This crate discovers capture devices on Linux (X11, ALSA, Video4Linux)
//! and macOS (AVFoundation), lets the user pick them, and assembles a single
//! ffmpeg invocation that records them into one file.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Devices, selections, configuration and the ffmpeg command builder
//! - **Application**: Use cases (capture, list, requirement check) and port interfaces
//! - **Infrastructure**: Adapter implementations (device probes, terminal prompt, ffmpeg runner, config file)
//! - **CLI**: Command-line interface, argument parsing and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
