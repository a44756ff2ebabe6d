//! CLI presenter for output formatting

use std::io::{self, IsTerminal};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{json, Map, Value};

use crate::application::{ListReport, Requirement};
use crate::domain::device::{CaptureDevice, DeviceKind};

/// Presenter for CLI output formatting.
/// Status goes to stderr, results (device lists, dry-run command) to stdout.
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    interactive: bool,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            interactive: io::stderr().is_terminal(),
        }
    }

    /// Spinner shown while device listing tools run
    pub fn probe_spinner(&self) -> ProbeSpinner {
        ProbeSpinner {
            enabled: self.interactive,
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print the devices of every listed kind
    pub fn device_report(&self, report: &ListReport) {
        for kind in &report.kinds {
            if let Some((_, e)) = report.failures.iter().find(|(k, _)| k == kind) {
                self.output(&format!("{}:", kind.title().bold()));
                self.error(&e.to_string());
                continue;
            }
            self.output(&format_devices(*kind, report.inventory.of(*kind)));
        }
    }

    /// Print the listed kinds as one JSON object
    pub fn device_report_json(&self, report: &ListReport) -> Result<(), serde_json::Error> {
        self.output(&serde_json::to_string_pretty(&report_json(report)?)?);
        Ok(())
    }

    /// Print the `--test` capability table
    pub fn requirements(&self, requirements: &[Requirement]) {
        self.output(&format_requirements(requirements));
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Spinner handle that can be shared with use case callbacks
#[derive(Clone)]
pub struct ProbeSpinner {
    enabled: bool,
    current: Arc<Mutex<Option<ProgressBar>>>,
}

impl ProbeSpinner {
    pub fn start(&self, message: &str) {
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));

        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.replace(spinner) {
                previous.finish_and_clear();
            }
        }
    }

    /// Clear the spinner so prompts and ffmpeg output start on a clean line
    pub fn stop(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(spinner) = current.take() {
                spinner.finish_and_clear();
            }
        }
    }
}

fn format_devices(kind: DeviceKind, devices: &[CaptureDevice]) -> String {
    let mut out = format!("{}:", kind.title().bold());
    if devices.is_empty() {
        out.push_str(&format!("\n  {}", "(none found)".dimmed()));
    }
    for device in devices {
        out.push_str(&format!(
            "\n  [{}] {}",
            device.index.to_string().cyan(),
            device.describe()
        ));
    }
    out
}

fn report_json(report: &ListReport) -> Result<Value, serde_json::Error> {
    let mut devices = Map::new();
    for kind in &report.kinds {
        if report.failures.iter().all(|(k, _)| k != kind) {
            devices.insert(kind.to_string(), serde_json::to_value(report.inventory.of(*kind))?);
        }
    }

    let errors: Map<String, Value> = report
        .failures
        .iter()
        .map(|(kind, e)| (kind.to_string(), Value::String(e.to_string())))
        .collect();

    let mut root = Value::Object(devices);
    if !errors.is_empty() {
        root["errors"] = json!(errors);
    }
    Ok(root)
}

fn format_requirements(requirements: &[Requirement]) -> String {
    let width = requirements
        .iter()
        .map(|r| r.label().len())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for requirement in requirements {
        let (symbol, status) = match (&requirement.found, requirement.required) {
            (Some(found), _) => ("✓".green(), format!("found {}", found)),
            (None, true) => ("✗".red(), "missing".to_string()),
            (None, false) => ("⚠".yellow(), "missing (optional)".to_string()),
        };
        lines.push(format!(
            "{} {:<width$}  {:<20}  {}",
            symbol,
            requirement.label(),
            status,
            requirement.purpose.dimmed(),
            width = width
        ));
        if !requirement.is_available() {
            lines.push(format!("  {}", requirement.hint));
        }
    }
    lines.join("\n")
}
