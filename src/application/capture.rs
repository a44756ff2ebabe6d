//! Capture use case: resolve devices, assemble the command, run or print it

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::command::{CaptureCommand, CapturePlan};
use crate::domain::device::{CaptureDevice, DeviceKind, DeviceSelection, Pick};
use crate::domain::error::{CommandError, DeviceSelectionError};
use crate::domain::platform::Platform;

use super::ports::{
    CommandRunner, DeviceProbe, ProbeError, PromptError, Prompter, RunError, RunOutcome,
};

/// Errors from the capture use case
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Selection(#[from] DeviceSelectionError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Run(#[from] RunError),
}

/// Input parameters for the capture use case
#[derive(Debug, Clone)]
pub struct CaptureInput {
    pub screen: DeviceSelection,
    pub audio: DeviceSelection,
    pub camera: DeviceSelection,
    pub framerate: u32,
    pub screen_args: Vec<String>,
    pub audio_args: Vec<String>,
    pub camera_args: Vec<String>,
    pub output_args: Vec<String>,
    pub output: PathBuf,
    /// Print the command instead of running it
    pub dry_run: bool,
}

impl CaptureInput {
    fn selection(&self, kind: DeviceKind) -> DeviceSelection {
        match kind {
            DeviceKind::Screen => self.screen,
            DeviceKind::Audio => self.audio,
            DeviceKind::Camera => self.camera,
        }
    }
}

/// What happened
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    DryRun(CaptureCommand),
    Finished {
        command: CaptureCommand,
        outcome: RunOutcome,
    },
}

/// Callbacks for progress and status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct CaptureCallbacks {
    /// Called before a device kind is probed
    pub on_probe_start: Option<Box<dyn Fn(DeviceKind) + Send + Sync>>,
    /// Called after probing with the number of devices found
    pub on_probe_end: Option<Box<dyn Fn(DeviceKind, usize) + Send + Sync>>,
    /// Called once a device of some kind is chosen
    pub on_device_selected: Option<Box<dyn Fn(&CaptureDevice) + Send + Sync>>,
    /// Called right before ffmpeg is started
    pub on_capture_start: Option<Box<dyn Fn(&CaptureCommand) + Send + Sync>>,
}

/// Capture use case
pub struct CaptureUseCase<P, Q, R>
where
    P: DeviceProbe,
    Q: Prompter,
    R: CommandRunner,
{
    platform: Platform,
    program: String,
    probe: P,
    prompter: Q,
    runner: R,
}

impl<P, Q, R> CaptureUseCase<P, Q, R>
where
    P: DeviceProbe,
    Q: Prompter,
    R: CommandRunner,
{
    /// Create a new use case instance
    pub fn new(platform: Platform, program: impl Into<String>, probe: P, prompter: Q, runner: R) -> Self {
        Self {
            platform,
            program: program.into(),
            probe,
            prompter,
            runner,
        }
    }

    /// Resolve every selection and build the command without running it
    pub async fn prepare(
        &self,
        input: &CaptureInput,
        callbacks: &CaptureCallbacks,
    ) -> Result<CaptureCommand, CaptureError> {
        let mut chosen = [None, None, None];
        for (slot, kind) in chosen.iter_mut().zip(DeviceKind::ALL) {
            *slot = self.select(kind, input.selection(kind), callbacks).await?;
        }
        let [screen, audio, camera] = chosen;

        let plan = CapturePlan {
            platform: self.platform,
            program: self.program.clone(),
            screen,
            audio,
            camera,
            framerate: input.framerate,
            screen_args: input.screen_args.clone(),
            audio_args: input.audio_args.clone(),
            camera_args: input.camera_args.clone(),
            output_args: input.output_args.clone(),
            output: input.output.clone(),
        };

        let command = CaptureCommand::build(&plan)?;
        tracing::debug!(command = %command.render(), "Assembled capture command");
        Ok(command)
    }

    /// Execute the capture workflow
    pub async fn execute(
        &self,
        input: CaptureInput,
        callbacks: CaptureCallbacks,
    ) -> Result<CaptureOutcome, CaptureError> {
        let command = self.prepare(&input, &callbacks).await?;

        if input.dry_run {
            return Ok(CaptureOutcome::DryRun(command));
        }

        if let Some(ref cb) = callbacks.on_capture_start {
            cb(&command);
        }

        let outcome = self.runner.run(&command).await?;
        Ok(CaptureOutcome::Finished { command, outcome })
    }

    async fn select(
        &self,
        kind: DeviceKind,
        selection: DeviceSelection,
        callbacks: &CaptureCallbacks,
    ) -> Result<Option<CaptureDevice>, CaptureError> {
        if selection.is_off() {
            return Ok(None);
        }

        if let Some(ref cb) = callbacks.on_probe_start {
            cb(kind);
        }
        let devices = self.probe.devices(kind).await?;
        if let Some(ref cb) = callbacks.on_probe_end {
            cb(kind, devices.len());
        }
        tracing::debug!(%kind, count = devices.len(), %selection, "Probed devices");

        let index = match selection.pick(kind, &devices)? {
            Pick::Skip => return Ok(None),
            Pick::Device(index) => index,
            Pick::Ask => self.prompter.choose(kind, &devices)?,
        };

        let device = devices
            .get(index)
            .cloned()
            .ok_or(DeviceSelectionError::OutOfRange {
                kind,
                index,
                max: devices.len().saturating_sub(1),
            })?;

        tracing::info!(%kind, name = %device.name, input = %device.input, "Selected device");
        if let Some(ref cb) = callbacks.on_device_selected {
            cb(&device);
        }
        Ok(Some(device))
    }
}
