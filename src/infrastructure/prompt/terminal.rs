//! Terminal prompter: numbered list on stderr, answer on stdin

use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;

use crate::application::ports::{PromptError, Prompter};
use crate::domain::device::{CaptureDevice, DeviceKind};

/// Asks on the controlling terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }

    /// Prompt loop over arbitrary streams.
    /// Re-asks until the answer is a listed index; EOF aborts.
    fn ask<R: BufRead, W: Write>(
        kind: DeviceKind,
        devices: &[CaptureDevice],
        input: &mut R,
        output: &mut W,
    ) -> Result<usize, PromptError> {
        let io_err = |e: io::Error| PromptError::Io(e.to_string());

        writeln!(output, "{}", format!("{}:", kind.title()).bold()).map_err(io_err)?;
        for device in devices {
            writeln!(output, "  [{}] {}", device.index.to_string().cyan(), device.describe())
                .map_err(io_err)?;
        }

        let max = devices.len().saturating_sub(1);
        loop {
            write!(output, "Select {} device [0-{}]: ", kind, max).map_err(io_err)?;
            output.flush().map_err(io_err)?;

            let mut line = String::new();
            if input.read_line(&mut line).map_err(io_err)? == 0 {
                writeln!(output).map_err(io_err)?;
                return Err(PromptError::Aborted);
            }

            match line.trim().parse::<usize>() {
                Ok(choice) if choice < devices.len() => {
                    tracing::debug!(%kind, choice, "Device chosen interactively");
                    return Ok(choice);
                }
                _ => {
                    writeln!(
                        output,
                        "{} Enter a number between 0 and {}",
                        "!".yellow().bold(),
                        max
                    )
                    .map_err(io_err)?;
                }
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn choose(&self, kind: DeviceKind, devices: &[CaptureDevice]) -> Result<usize, PromptError> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return Err(PromptError::NotInteractive {
                kind,
                flag: kind.flag(),
            });
        }

        let mut stderr = io::stderr();
        Self::ask(kind, devices, &mut stdin.lock(), &mut stderr)
    }
}
