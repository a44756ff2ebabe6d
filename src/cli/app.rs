//! Main app runners: capture, device listing and the requirement check

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDateTime};

use crate::application::ports::ConfigStore;
use crate::application::{
    all_required_available, check_requirements, list_devices, CaptureCallbacks, CaptureInput,
    CaptureOutcome, CaptureUseCase,
};
use crate::domain::command::{output_path, split_args, CaptureCommand, Extension};
use crate::domain::config::AppConfig;
use crate::domain::device::{CaptureDevice, DeviceKind, DeviceSelection};
use crate::domain::error::CommandError;
use crate::domain::platform::Platform;
use crate::infrastructure::{create_probe, FfmpegRunner, TerminalPrompter, WhichToolLocator};

use super::args::Cli;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Options of a capture run that never come from the config file
#[derive(Debug, Clone, Default)]
pub struct CaptureOptions {
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

/// Config values given on the command line
pub fn cli_config(cli: &Cli) -> AppConfig {
    AppConfig {
        screen: cli.screen.map(|s| s.to_string()),
        audio: cli.audio.map(|s| s.to_string()),
        camera: cli.camera.map(|s| s.to_string()),
        screen_args: cli.sargs.clone(),
        audio_args: cli.aargs.clone(),
        camera_args: cli.cargs.clone(),
        output_args: cli.oargs.clone(),
        extension: cli.extension.clone(),
        framerate: cli.framerate,
        output_dir: None,
        ffmpeg: None,
    }
}

/// Load and merge configuration: defaults < file < CLI
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
    presenter: &Presenter,
) -> AppConfig {
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.warn(&format!(
                "Ignoring config file {}: {}",
                store.path().display(),
                e
            ));
            AppConfig::empty()
        }
    };

    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Turn merged config into use case input. Errors are usage errors.
pub fn capture_input(
    config: &AppConfig,
    options: &CaptureOptions,
    started: NaiveDateTime,
) -> Result<CaptureInput, String> {
    let selection = |kind: DeviceKind| -> Result<DeviceSelection, String> {
        config
            .selection(kind)
            .map_err(|e| format!("{} ({})", e, kind))
    };
    let args = |flag: &str, value: &str| -> Result<Vec<String>, String> {
        split_args(value).map_err(|e| format!("--{}: {}", flag, e))
    };

    let extension = Extension::parse(config.extension_or_default()).map_err(|e| e.to_string())?;
    let output_dir = config.output_dir_or_default();
    let output = output_path(
        options.output.as_deref(),
        output_dir.as_deref(),
        started,
        &extension,
    );
    // Command arguments are UTF-8 strings
    if output.to_str().is_none() {
        return Err(CommandError::NonUtf8Output(output.to_string_lossy().into_owned()).to_string());
    }

    Ok(CaptureInput {
        screen: selection(DeviceKind::Screen)?,
        audio: selection(DeviceKind::Audio)?,
        camera: selection(DeviceKind::Camera)?,
        framerate: config.framerate_or_default(),
        screen_args: args("sargs", config.screen_args_or_default())?,
        audio_args: args("aargs", config.audio_args_or_default())?,
        camera_args: args("cargs", config.camera_args_or_default())?,
        output_args: args("oargs", config.output_args_or_default())?,
        output,
        dry_run: options.dry_run,
    })
}

/// Resolve devices, then run or print the ffmpeg command
pub async fn run_capture(config: AppConfig, options: CaptureOptions, presenter: Presenter) -> ExitCode {
    let platform = match Platform::current() {
        Ok(p) => p,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let input = match capture_input(&config, &options, Local::now().naive_local()) {
        Ok(input) => input,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let ffmpeg = config.ffmpeg_or_default();
    let use_case = CaptureUseCase::new(
        platform,
        ffmpeg,
        create_probe(platform, ffmpeg),
        TerminalPrompter::new(),
        FfmpegRunner::new(),
    );

    let spinner = presenter.probe_spinner();
    let (start_spinner, stop_spinner) = (spinner.clone(), spinner.clone());
    let output = input.output.clone();
    let callbacks = CaptureCallbacks {
        on_probe_start: Some(Box::new(move |kind: DeviceKind| {
            start_spinner.start(&format!("Looking for {} devices...", kind));
        })),
        on_probe_end: Some(Box::new(move |_: DeviceKind, _: usize| stop_spinner.stop())),
        on_device_selected: Some(Box::new(move |device: &CaptureDevice| {
            presenter.info(&format!("Using {}: {}", device.kind, device.describe()));
        })),
        on_capture_start: Some(Box::new(move |_: &CaptureCommand| {
            presenter.info(&format!(
                "Recording to {} (press q or Ctrl+C to stop)",
                output.display()
            ));
        })),
    };

    let result = use_case.execute(input, callbacks).await;
    spinner.stop();

    match result {
        Ok(CaptureOutcome::DryRun(command)) => {
            presenter.output(&command.render());
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(CaptureOutcome::Finished { command, outcome }) => {
            let saved = command.args.last().map(String::as_str).unwrap_or_default();
            if outcome.interrupted {
                presenter.success(&format!("Capture stopped. Saved to {}", saved));
            } else {
                presenter.success(&format!("Saved to {}", saved));
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// List devices of the requested kinds
pub async fn run_list(
    config: &AppConfig,
    kinds: &[DeviceKind],
    json: bool,
    presenter: Presenter,
) -> ExitCode {
    let platform = match Platform::current() {
        Ok(p) => p,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let probe = create_probe(platform, config.ffmpeg_or_default());
    let spinner = presenter.probe_spinner();
    spinner.start("Looking for devices...");
    let report = list_devices(&probe, kinds).await;
    spinner.stop();

    if json {
        if let Err(e) = presenter.device_report_json(&report) {
            presenter.error(&format!("Failed to encode device list: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    } else {
        presenter.device_report(&report);
    }

    if report.is_complete() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Report which external tools are installed
pub async fn run_check(config: &AppConfig, presenter: Presenter) -> ExitCode {
    let platform = match Platform::current() {
        Ok(p) => p,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let requirements =
        check_requirements(platform, config.ffmpeg_or_default(), &WhichToolLocator::new()).await;
    presenter.requirements(&requirements);

    if all_required_available(&requirements) {
        presenter.success(&format!("Ready to capture on {}", platform));
        ExitCode::from(EXIT_SUCCESS)
    } else {
        presenter.error("Required tools are missing");
        ExitCode::from(EXIT_ERROR)
    }
}
