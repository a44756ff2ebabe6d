//! Domain error types

use thiserror::Error;

use super::device::DeviceKind;

/// Error when parsing a device selection string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid device selection: \"{input}\". Expected a device number, 'prompt' or 'off'")]
pub struct SelectionParseError {
    pub input: String,
}

/// Error when a selection cannot be resolved against the probed devices
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceSelectionError {
    #[error("No {0} devices found")]
    NoDevices(DeviceKind),

    #[error("There is no {kind} device {index}. Valid choices: 0-{max}")]
    OutOfRange {
        kind: DeviceKind,
        index: usize,
        max: usize,
    },
}

/// Error when the current operating system is not supported
#[derive(Debug, Clone, Error)]
#[error("Unsupported operating system: {os}. Only Linux and macOS are supported")]
pub struct UnsupportedPlatform {
    pub os: String,
}

/// Error when splitting an argument string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentSplitError {
    #[error("Unterminated {quote} quote in \"{input}\"")]
    UnterminatedQuote { quote: char, input: String },

    #[error("Trailing backslash in \"{input}\"")]
    TrailingEscape { input: String },
}

/// Error when assembling the capture command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Nothing to capture: select a screen (-s), microphone (-a) or camera (-c)")]
    NothingToCapture,

    #[error("Invalid file extension: \"{0}\". Use letters and digits only (e.g. mkv, mp4)")]
    InvalidExtension(String),

    #[error("Screen device \"{0}\" has no known size")]
    MissingGeometry(String),

    #[error("Output path is not valid UTF-8: \"{0}\"")]
    NonUtf8Output(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
