//! Command execution port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::command::CaptureCommand;

/// Execution errors
#[derive(Debug, Clone, Error)]
pub enum RunError {
    #[error("'{0}' not found. Install FFmpeg or set the ffmpeg path with 'capcast config set ffmpeg <path>'")]
    FfmpegNotFound(String),

    #[error("Failed to start capture: {0}")]
    SpawnFailed(String),

    #[error("FFmpeg exited with status {0}")]
    Failed(i32),

    #[error("FFmpeg was terminated by a signal")]
    Killed,
}

/// How a finished capture ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Exit code of the child, if it exited normally
    pub code: Option<i32>,
    /// The user stopped the capture (Ctrl+C or SIGTERM)
    pub interrupted: bool,
}

/// Port for running the assembled capture command
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion with the terminal attached
    async fn run(&self, command: &CaptureCommand) -> Result<RunOutcome, RunError>;
}
