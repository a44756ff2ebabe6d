//! Linux device probe (X11, ALSA, Video4Linux)

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{DeviceProbe, ProbeError, ToolLocator};
use crate::domain::device::{CaptureDevice, DeviceKind};
use crate::domain::platform::{self, DisplayServer};

use super::parsers::{
    parse_arecord_devices, parse_v4l2_devices, parse_xdpyinfo_screens, parse_xrandr_monitors,
    video_node_number,
};
use super::{missing_tool, run_tool};

/// Enumerates devices by scraping Linux command-line tools
pub struct LinuxDeviceProbe<L: ToolLocator> {
    locator: L,
    display: Option<String>,
    dev_root: PathBuf,
    sysfs_root: PathBuf,
    tool_dir: Option<PathBuf>,
}

impl<L: ToolLocator> LinuxDeviceProbe<L> {
    /// Probe the X display named by `DISPLAY`
    pub fn new(locator: L) -> Self {
        Self {
            locator,
            display: platform::x11_display(),
            dev_root: PathBuf::from("/dev"),
            sysfs_root: PathBuf::from("/sys/class/video4linux"),
            tool_dir: None,
        }
    }

    pub fn with_display(mut self, display: Option<String>) -> Self {
        self.display = display;
        self
    }

    /// Override where camera nodes are looked for when v4l2-ctl is missing
    pub fn with_device_roots(mut self, dev_root: impl Into<PathBuf>, sysfs_root: impl Into<PathBuf>) -> Self {
        self.dev_root = dev_root.into();
        self.sysfs_root = sysfs_root.into();
        self
    }

    /// Run listing tools from `dir` instead of resolving them on `PATH`
    pub fn with_tool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tool_dir = Some(dir.into());
        self
    }

    fn tool(&self, name: &str) -> String {
        match &self.tool_dir {
            Some(dir) => dir.join(name).to_string_lossy().into_owned(),
            None => name.to_string(),
        }
    }

    async fn xrandr_screens(&self, display: &str) -> Result<Vec<CaptureDevice>, ProbeError> {
        let output = run_tool(&self.tool("xrandr"), &["--listactivemonitors"], DeviceKind::Screen).await?;
        if !output.success {
            return Err(ProbeError::CommandFailed {
                tool: "xrandr".to_string(),
                message: output.error_line(),
            });
        }
        Ok(parse_xrandr_monitors(&output.stdout, display))
    }

    async fn xdpyinfo_screens(&self, display: &str) -> Result<Vec<CaptureDevice>, ProbeError> {
        let output = run_tool(&self.tool("xdpyinfo"), &[], DeviceKind::Screen).await?;
        if !output.success {
            return Err(ProbeError::CommandFailed {
                tool: "xdpyinfo".to_string(),
                message: output.error_line(),
            });
        }
        Ok(parse_xdpyinfo_screens(&output.stdout, display))
    }

    /// Fallback camera discovery: `/dev/videoN` nodes named through sysfs
    async fn scan_video_nodes(&self) -> Result<Vec<CaptureDevice>, ProbeError> {
        let mut entries = match fs::read_dir(&self.dev_root).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(error = %e, root = %self.dev_root.display(), "Cannot scan for video nodes");
                return Ok(Vec::new());
            }
        };

        let mut nodes = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let file_name = entry.file_name().to_string_lossy().to_string();
            if let Some(number) = video_node_number(&file_name) {
                nodes.push((number, file_name));
            }
        }
        nodes.sort();

        let mut devices = Vec::new();
        for (_, file_name) in nodes {
            let sysfs = self.sysfs_root.join(&file_name);
            // Metadata nodes share the device but have a non-zero index
            if let Some(index) = read_trimmed(&sysfs.join("index")).await {
                if index != "0" {
                    continue;
                }
            }
            let name = read_trimmed(&sysfs.join("name"))
                .await
                .unwrap_or_else(|| file_name.clone());
            let input = self.dev_root.join(&file_name).to_string_lossy().to_string();
            devices.push(CaptureDevice::new(DeviceKind::Camera, devices.len(), name, input));
        }

        Ok(devices)
    }
}

async fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .await
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[async_trait]
impl<L: ToolLocator> DeviceProbe for LinuxDeviceProbe<L> {
    async fn screens(&self) -> Result<Vec<CaptureDevice>, ProbeError> {
        let Some(display) = self.display.as_deref() else {
            if DisplayServer::detect() == DisplayServer::Wayland {
                tracing::warn!("Wayland session without XWayland; x11grab cannot capture it");
            }
            return Err(ProbeError::NoDisplay);
        };

        let mut xrandr_ran = false;
        if self.locator.is_available(&self.tool("xrandr")).await {
            let screens = self.xrandr_screens(display).await?;
            if !screens.is_empty() {
                return Ok(screens);
            }
            xrandr_ran = true;
            tracing::debug!("xrandr reported no active monitors, trying xdpyinfo");
        }

        if self.locator.is_available(&self.tool("xdpyinfo")).await {
            return self.xdpyinfo_screens(display).await;
        }

        if xrandr_ran {
            return Ok(Vec::new());
        }

        let mut err = missing_tool("xrandr", DeviceKind::Screen);
        if let ProbeError::ToolMissing { hint, .. } = &mut err {
            hint.push_str(" (or 'x11-utils' for xdpyinfo)");
        }
        Err(err)
    }

    async fn microphones(&self) -> Result<Vec<CaptureDevice>, ProbeError> {
        let arecord = self.tool("arecord");
        if !self.locator.is_available(&arecord).await {
            return Err(missing_tool("arecord", DeviceKind::Audio));
        }

        let output = run_tool(&arecord, &["-l"], DeviceKind::Audio).await?;
        if !output.success {
            if output.stderr.contains("no soundcards found") {
                return Ok(Vec::new());
            }
            return Err(ProbeError::CommandFailed {
                tool: "arecord".to_string(),
                message: output.error_line(),
            });
        }

        Ok(parse_arecord_devices(&output.stdout))
    }

    async fn cameras(&self) -> Result<Vec<CaptureDevice>, ProbeError> {
        let v4l2_ctl = self.tool("v4l2-ctl");
        if self.locator.is_available(&v4l2_ctl).await {
            let output = run_tool(&v4l2_ctl, &["--list-devices"], DeviceKind::Camera).await?;
            let cameras = parse_v4l2_devices(&output.stdout);
            if !cameras.is_empty() {
                return Ok(cameras);
            }
            // v4l2-ctl exits non-zero when there is nothing to list
            tracing::debug!(stderr = %output.error_line(), "v4l2-ctl listed no cameras");
        } else {
            tracing::debug!("v4l2-ctl not found, scanning for video nodes");
        }

        self.scan_video_nodes().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    struct NothingInstalled;

    #[async_trait]
    impl ToolLocator for NothingInstalled {
        async fn is_available(&self, _tool: &str) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn screens_without_display_fail() {
        let probe = LinuxDeviceProbe::new(NothingInstalled).with_display(None);
        assert!(matches!(probe.screens().await, Err(ProbeError::NoDisplay)));
    }

    #[tokio::test]
    async fn screens_without_tools_report_missing_tool() {
        let probe = LinuxDeviceProbe::new(NothingInstalled).with_display(Some(":0".to_string()));
        match probe.screens().await {
            Err(ProbeError::ToolMissing { tool, kind, hint }) => {
                assert_eq!(tool, "xrandr");
                assert_eq!(kind, DeviceKind::Screen);
                assert!(hint.contains("xdpyinfo"));
            }
            other => panic!("Expected ToolMissing, got {:?}", other),
        }
    }

    /// Locator that knows only the tools whose file names are listed
    struct Installed(&'static [&'static str]);

    #[async_trait]
    impl ToolLocator for Installed {
        async fn is_available(&self, tool: &str) -> bool {
            Path::new(tool)
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| self.0.contains(&name))
        }
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std_fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std_fs::set_permissions(&path, std_fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn xrandr_without_monitors_yields_no_screens() {
        let tools = tempfile::tempdir().unwrap();
        write_script(tools.path(), "xrandr", "echo 'Monitors: 0'");

        let probe = LinuxDeviceProbe::new(Installed(&["xrandr"]))
            .with_display(Some(":0".to_string()))
            .with_tool_dir(tools.path());

        assert_eq!(probe.screens().await.unwrap(), Vec::new());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn xrandr_monitors_are_listed() {
        let tools = tempfile::tempdir().unwrap();
        write_script(
            tools.path(),
            "xrandr",
            "echo 'Monitors: 1'; echo ' 0: +*eDP-1 1920/344x1080/194+0+0  eDP-1'",
        );

        let probe = LinuxDeviceProbe::new(Installed(&["xrandr"]))
            .with_display(Some(":0".to_string()))
            .with_tool_dir(tools.path());

        let screens = probe.screens().await.unwrap();
        assert_eq!(screens.len(), 1);
        assert_eq!(screens[0].name, "eDP-1");
    }

    #[tokio::test]
    async fn microphones_need_arecord() {
        let probe = LinuxDeviceProbe::new(NothingInstalled);
        assert!(matches!(
            probe.microphones().await,
            Err(ProbeError::ToolMissing { kind: DeviceKind::Audio, .. })
        ));
    }

    #[tokio::test]
    async fn cameras_fall_back_to_dev_scan() {
        let dev = tempfile::tempdir().unwrap();
        let sysfs = tempfile::tempdir().unwrap();

        for node in ["video0", "video1", "video10", "video2", "media0"] {
            std_fs::write(dev.path().join(node), b"").unwrap();
        }
        for (node, name, index) in [
            ("video0", "Integrated Camera", "0"),
            ("video1", "Integrated Camera", "1"),
            ("video2", "C922 Pro Stream Webcam", "0"),
        ] {
            let dir = sysfs.path().join(node);
            std_fs::create_dir_all(&dir).unwrap();
            std_fs::write(dir.join("name"), format!("{}\n", name)).unwrap();
            std_fs::write(dir.join("index"), format!("{}\n", index)).unwrap();
        }

        let probe = LinuxDeviceProbe::new(NothingInstalled).with_device_roots(dev.path(), sysfs.path());
        let cameras = probe.cameras().await.unwrap();

        let names: Vec<_> = cameras.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Integrated Camera", "C922 Pro Stream Webcam", "video10"]);
        assert_eq!(cameras[1].index, 1);
        assert!(cameras[1].input.ends_with("video2"));
        assert!(cameras[2].input.ends_with("video10"));
    }

    #[tokio::test]
    async fn cameras_without_dev_root_are_empty() {
        let probe = LinuxDeviceProbe::new(NothingInstalled)
            .with_device_roots("/nonexistent/capcast-dev", "/nonexistent/capcast-sys");
        assert!(probe.cameras().await.unwrap().is_empty());
    }
}
