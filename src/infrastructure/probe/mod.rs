//! Device probe adapters
//!
//! Linux scrapes xrandr/xdpyinfo, arecord and v4l2-ctl; macOS scrapes
//! ffmpeg's avfoundation device listing.

mod factory;
mod linux;
mod macos;
pub mod parsers;

use std::process::Stdio;

use tokio::process::Command;

use crate::application::install_hint;
use crate::application::ports::ProbeError;
use crate::domain::device::DeviceKind;

pub use factory::create_probe;
pub use linux::LinuxDeviceProbe;
pub use macos::MacDeviceProbe;

/// Captured output of a listing tool
#[derive(Debug)]
struct ToolOutput {
    stdout: String,
    stderr: String,
    success: bool,
}

impl ToolOutput {
    /// Last non-empty stderr line, the usual place for the reason of a failure
    fn error_line(&self) -> String {
        self.stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("unknown error")
            .trim()
            .to_string()
    }
}

/// Run a listing tool to completion and capture its output
async fn run_tool(tool: &str, args: &[&str], kind: DeviceKind) -> Result<ToolOutput, ProbeError> {
    tracing::debug!(tool, ?args, "Running device listing tool");

    let output = Command::new(tool)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                missing_tool(tool, kind)
            } else {
                ProbeError::CommandFailed {
                    tool: tool.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

    Ok(ToolOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    })
}

fn missing_tool(tool: &str, kind: DeviceKind) -> ProbeError {
    ProbeError::ToolMissing {
        tool: tool.to_string(),
        kind,
        hint: install_hint(tool),
    }
}
