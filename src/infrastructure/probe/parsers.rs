//! Scrapers for the text output of device-listing tools
//!
//! Every function here is pure so it can be tested against captured output.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::device::{CaptureDevice, DeviceKind, Geometry};

/// Name prefix avfoundation gives to screen capture sources
const AVFOUNDATION_SCREEN_PREFIX: &str = "Capture screen";

/// ` 0: +*eDP-1 1920/344x1080/194+0+0  eDP-1`
fn xrandr_monitor_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(\d+):\s+[+*]*(\S+)\s+(\d+)/\d+x(\d+)/\d+([+-]\d+)([+-]\d+)")
            .expect("valid xrandr regex")
    })
}

/// `  dimensions:    3840x1080 pixels (1016x286 millimeters)`
fn xdpyinfo_dimensions_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*dimensions:\s+(\d+)x(\d+)\s+pixels").expect("valid xdpyinfo regex")
    })
}

/// `card 0: PCH [HDA Intel PCH], device 0: ALC3246 Analog [ALC3246 Analog]`
fn arecord_card_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^card (\d+): \S+ \[(.*?)\], device (\d+): .*?\[(.*?)\]\s*$")
            .expect("valid arecord regex")
    })
}

/// `[AVFoundation indev @ 0x7fb8c9c04a40] [1] Capture screen 0`
fn avfoundation_entry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\[[^\]]*\]\s+\[(\d+)\]\s+(.+?)\s*$").expect("valid avfoundation regex")
    })
}

/// Strip a trailing screen number from an X display name (`:0.1` -> `:0`)
pub fn display_base(display: &str) -> &str {
    match display.rfind(':') {
        Some(colon) => match display[colon..].find('.') {
            Some(dot) => &display[..colon + dot],
            None => display,
        },
        None => display,
    }
}

/// Parse `xrandr --listactivemonitors`.
/// Each monitor becomes a screen grabbed at its offset on `display`.
pub fn parse_xrandr_monitors(output: &str, display: &str) -> Vec<CaptureDevice> {
    output
        .lines()
        .filter_map(|line| xrandr_monitor_pattern().captures(line))
        .enumerate()
        .filter_map(|(index, caps)| {
            let geometry = Geometry::new(
                caps[3].parse().ok()?,
                caps[4].parse().ok()?,
                caps[5].parse().ok()?,
                caps[6].parse().ok()?,
            );
            let input = format!("{}+{},{}", display, geometry.x, geometry.y);
            Some(CaptureDevice::new(DeviceKind::Screen, index, &caps[2], input).with_geometry(geometry))
        })
        .collect()
}

/// Parse `xdpyinfo`. Each X screen becomes one device at offset 0,0.
pub fn parse_xdpyinfo_screens(output: &str, display: &str) -> Vec<CaptureDevice> {
    let base = display_base(display);
    let mut devices = Vec::new();
    let mut current_screen: Option<u32> = None;

    for line in output.lines() {
        if let Some(rest) = line.trim().strip_prefix("screen #") {
            current_screen = rest.trim_end_matches(':').parse().ok();
            continue;
        }

        let (Some(screen), Some(caps)) = (current_screen, xdpyinfo_dimensions_pattern().captures(line))
        else {
            continue;
        };
        let (Ok(width), Ok(height)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
            continue;
        };

        let index = devices.len();
        devices.push(
            CaptureDevice::new(
                DeviceKind::Screen,
                index,
                format!("Screen {}", screen),
                format!("{}.{}+0,0", base, screen),
            )
            .with_geometry(Geometry::new(width, height, 0, 0)),
        );
        current_screen = None;
    }

    devices
}

/// Parse `arecord -l` into ALSA `hw:CARD,DEVICE` inputs
pub fn parse_arecord_devices(output: &str) -> Vec<CaptureDevice> {
    output
        .lines()
        .filter_map(|line| arecord_card_pattern().captures(line))
        .enumerate()
        .map(|(index, caps)| {
            CaptureDevice::new(
                DeviceKind::Audio,
                index,
                format!("{}: {}", &caps[2], &caps[4]),
                format!("hw:{},{}", &caps[1], &caps[3]),
            )
        })
        .collect()
}

/// Parse `v4l2-ctl --list-devices`.
///
/// Devices are headed by an unindented `Name (bus):` line followed by
/// indented nodes; the first `/dev/video*` node of each is the capture node.
pub fn parse_v4l2_devices(output: &str) -> Vec<CaptureDevice> {
    let mut devices: Vec<CaptureDevice> = Vec::new();
    let mut current: Option<String> = None;

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }

        if !line.starts_with(char::is_whitespace) {
            current = Some(v4l2_device_name(line));
            continue;
        }

        let node = line.trim();
        if !node.starts_with("/dev/video") {
            continue;
        }
        if let Some(name) = current.take() {
            let index = devices.len();
            devices.push(CaptureDevice::new(DeviceKind::Camera, index, name, node));
        }
    }

    devices
}

/// `Integrated Camera: Integrated C (usb-0000:00:14.0-8):` -> `Integrated Camera: Integrated C`
fn v4l2_device_name(header: &str) -> String {
    let header = header.trim().trim_end_matches(':');
    match header.rfind(" (") {
        Some(pos) if header.ends_with(')') => header[..pos].trim().to_string(),
        _ => header.to_string(),
    }
}

/// Devices listed by `ffmpeg -f avfoundation -list_devices true -i ""`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AvFoundationDevices {
    pub screens: Vec<CaptureDevice>,
    pub cameras: Vec<CaptureDevice>,
    pub audio: Vec<CaptureDevice>,
}

/// Parse ffmpeg's avfoundation device listing (printed on stderr).
/// The avfoundation index becomes the device input.
pub fn parse_avfoundation_devices(output: &str) -> AvFoundationDevices {
    #[derive(Clone, Copy)]
    enum Section {
        None,
        Video,
        Audio,
    }

    let mut devices = AvFoundationDevices::default();
    let mut section = Section::None;

    for line in output.lines() {
        if line.contains("AVFoundation video devices") {
            section = Section::Video;
            continue;
        }
        if line.contains("AVFoundation audio devices") {
            section = Section::Audio;
            continue;
        }

        let Some(caps) = avfoundation_entry_pattern().captures(line) else {
            continue;
        };
        let (input, name) = (caps[1].to_string(), caps[2].to_string());

        match section {
            Section::None => {}
            Section::Video if name.starts_with(AVFOUNDATION_SCREEN_PREFIX) => {
                let index = devices.screens.len();
                devices
                    .screens
                    .push(CaptureDevice::new(DeviceKind::Screen, index, name, input));
            }
            Section::Video => {
                let index = devices.cameras.len();
                devices
                    .cameras
                    .push(CaptureDevice::new(DeviceKind::Camera, index, name, input));
            }
            Section::Audio => {
                let index = devices.audio.len();
                devices
                    .audio
                    .push(CaptureDevice::new(DeviceKind::Audio, index, name, input));
            }
        }
    }

    devices
}

/// `videoN` device node number, used to order the `/dev` fallback scan
pub fn video_node_number(file_name: &str) -> Option<u32> {
    file_name.strip_prefix("video")?.parse().ok()
}
