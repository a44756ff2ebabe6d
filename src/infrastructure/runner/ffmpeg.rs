//! FFmpeg process runner

use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::{Child, Command};

use crate::application::ports::{CommandRunner, RunError, RunOutcome};
use crate::domain::command::CaptureCommand;

/// Runs the capture in the foreground with the terminal attached
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegRunner;

impl FfmpegRunner {
    pub fn new() -> Self {
        Self
    }

    fn spawn(command: &CaptureCommand) -> Result<Child, RunError> {
        Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RunError::FfmpegNotFound(command.program.clone())
                } else {
                    RunError::SpawnFailed(e.to_string())
                }
            })
    }

    /// Wait for the child while absorbing SIGINT and forwarding SIGTERM.
    /// Returns the exit status and whether the user stopped the capture.
    #[cfg(unix)]
    async fn wait(child: Child) -> Result<(ExitStatus, bool), RunError> {
        use tokio::signal::unix::SignalKind;

        Self::wait_for(child, SignalKind::interrupt(), SignalKind::terminate()).await
    }

    /// `interrupt` is only recorded; `terminate` is forwarded to the child as SIGINT
    #[cfg(unix)]
    async fn wait_for(
        mut child: Child,
        interrupt: tokio::signal::unix::SignalKind,
        terminate: tokio::signal::unix::SignalKind,
    ) -> Result<(ExitStatus, bool), RunError> {
        use tokio::signal::unix::signal;

        let spawn_err = |e: std::io::Error| RunError::SpawnFailed(e.to_string());
        let mut interrupt = signal(interrupt).map_err(spawn_err)?;
        let mut terminate = signal(terminate).map_err(spawn_err)?;
        let mut interrupted = false;

        loop {
            tokio::select! {
                status = child.wait() => {
                    let status = status.map_err(spawn_err)?;
                    return Ok((status, interrupted));
                }
                _ = interrupt.recv() => {
                    // The terminal delivers SIGINT to ffmpeg too; it finalizes the file
                    tracing::debug!("SIGINT received, waiting for ffmpeg to finish");
                    interrupted = true;
                }
                _ = terminate.recv() => {
                    tracing::debug!("SIGTERM received, forwarding SIGINT to ffmpeg");
                    interrupted = true;
                    Self::send_interrupt(&child);
                }
            }
        }
    }

    #[cfg(not(unix))]
    async fn wait(mut child: Child) -> Result<(ExitStatus, bool), RunError> {
        let status = child
            .wait()
            .await
            .map_err(|e| RunError::SpawnFailed(e.to_string()))?;
        Ok((status, false))
    }

    #[cfg(unix)]
    fn send_interrupt(child: &Child) {
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        if let Some(id) = child.id() {
            if let Err(e) = signal::kill(Pid::from_raw(id as i32), Signal::SIGINT) {
                tracing::warn!(error = %e, "Failed to forward signal to ffmpeg");
            }
        }
    }

    fn outcome(status: ExitStatus, interrupted: bool) -> Result<RunOutcome, RunError> {
        if status.success() || interrupted {
            return Ok(RunOutcome {
                code: status.code(),
                interrupted,
            });
        }

        match status.code() {
            Some(code) => Err(RunError::Failed(code)),
            None => Err(RunError::Killed),
        }
    }
}

#[async_trait]
impl CommandRunner for FfmpegRunner {
    async fn run(&self, command: &CaptureCommand) -> Result<RunOutcome, RunError> {
        tracing::info!(program = %command.program, args = command.args.len(), "Starting capture");

        let child = Self::spawn(command)?;
        let (status, interrupted) = Self::wait(child).await?;

        tracing::info!(?status, interrupted, "Capture process exited");
        Self::outcome(status, interrupted)
    }
}
