//! Requirement check use case (`--test`)

use std::path::Path;

use crate::domain::platform::Platform;

use super::ports::ToolLocator;

/// An external program capcast relies on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Candidates, any one of which satisfies the requirement
    pub tools: Vec<String>,
    pub purpose: &'static str,
    pub required: bool,
    /// The first candidate that was found
    pub found: Option<String>,
    pub hint: String,
}

impl Requirement {
    fn new(tools: &[&str], purpose: &'static str, required: bool) -> Self {
        Self {
            tools: tools.iter().map(|t| t.to_string()).collect(),
            purpose,
            required,
            found: None,
            hint: tools
                .iter()
                .map(|t| install_hint(t))
                .collect::<Vec<_>>()
                .join(" or "),
        }
    }

    pub fn is_available(&self) -> bool {
        self.found.is_some()
    }

    /// Display label, e.g. `xrandr|xdpyinfo`
    pub fn label(&self) -> String {
        self.tools.join("|")
    }
}

/// How to get a tool onto the system
pub fn install_hint(tool: &str) -> String {
    let name = Path::new(tool)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(tool);
    if name == "ffmpeg" && cfg!(target_os = "macos") {
        return "Install it with: brew install ffmpeg".to_string();
    }
    let package = match name {
        "xrandr" => "x11-xserver-utils",
        "xdpyinfo" => "x11-utils",
        "arecord" => "alsa-utils",
        "v4l2-ctl" => "v4l-utils",
        other => other,
    };
    format!("Install the '{}' package", package)
}

/// Tools needed on `platform`, in the order they are reported
pub fn requirements(platform: Platform, ffmpeg: &str) -> Vec<Requirement> {
    match platform {
        Platform::Linux => vec![
            Requirement::new(&[ffmpeg], "encoder", true),
            Requirement::new(&["xrandr", "xdpyinfo"], "screen listing", true),
            Requirement::new(&["arecord"], "microphone listing", false),
            Requirement::new(&["v4l2-ctl"], "camera listing (falls back to /dev/video*)", false),
        ],
        Platform::MacOs => vec![Requirement::new(
            &[ffmpeg],
            "encoder and avfoundation device listing",
            true,
        )],
    }
}

/// Look up every requirement for `platform`
pub async fn check_requirements<L: ToolLocator>(
    platform: Platform,
    ffmpeg: &str,
    locator: &L,
) -> Vec<Requirement> {
    let mut checked = requirements(platform, ffmpeg);
    for requirement in &mut checked {
        for tool in &requirement.tools {
            if locator.is_available(tool).await {
                requirement.found = Some(tool.clone());
                break;
            }
        }
        tracing::debug!(
            tools = %requirement.label(),
            found = ?requirement.found,
            "Checked requirement"
        );
    }
    checked
}

/// True when nothing required is missing
pub fn all_required_available(requirements: &[Requirement]) -> bool {
    requirements
        .iter()
        .filter(|r| r.required)
        .all(Requirement::is_available)
}
