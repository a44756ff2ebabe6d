//! Assembly of the ffmpeg capture invocation

use std::path::PathBuf;

use crate::domain::device::CaptureDevice;
use crate::domain::error::CommandError;
use crate::domain::platform::Platform;

use super::arguments::quote_arg;

/// Default capture framerate
pub const DEFAULT_FRAMERATE: u32 = 30;

/// Width the camera picture is scaled to when overlaid on the screen
pub const CAMERA_OVERLAY_WIDTH: u32 = 320;

/// Gap between the camera overlay and the screen edges, in pixels
pub const CAMERA_OVERLAY_MARGIN: u32 = 10;

/// Everything needed to build one capture command
#[derive(Debug, Clone)]
pub struct CapturePlan {
    pub platform: Platform,
    /// ffmpeg binary to invoke
    pub program: String,
    pub screen: Option<CaptureDevice>,
    pub audio: Option<CaptureDevice>,
    pub camera: Option<CaptureDevice>,
    pub framerate: u32,
    /// Video encoder options
    pub screen_args: Vec<String>,
    /// Audio encoder options
    pub audio_args: Vec<String>,
    /// Camera input options, placed before the camera `-i`
    pub camera_args: Vec<String>,
    /// Extra options placed right before the output file
    pub output_args: Vec<String>,
    pub output: PathBuf,
}

impl CapturePlan {
    pub fn has_video(&self) -> bool {
        self.screen.is_some() || self.camera.is_some()
    }
}

/// A fully assembled external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Input positions of each selected source, used for `-map`
#[derive(Debug, Default)]
struct InputIndexes {
    screen: Option<usize>,
    camera: Option<usize>,
    audio: Option<usize>,
}

impl CaptureCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build the ffmpeg invocation for a plan
    pub fn build(plan: &CapturePlan) -> Result<Self, CommandError> {
        if plan.screen.is_none() && plan.audio.is_none() && plan.camera.is_none() {
            return Err(CommandError::NothingToCapture);
        }
        let output = plan
            .output
            .to_str()
            .ok_or_else(|| CommandError::NonUtf8Output(plan.output.to_string_lossy().into_owned()))?;

        let mut args = Vec::new();
        let indexes = match plan.platform {
            Platform::Linux => push_linux_inputs(plan, &mut args)?,
            Platform::MacOs => push_avfoundation_inputs(plan, &mut args),
        };

        match (indexes.screen, indexes.camera) {
            (Some(screen), Some(camera)) => {
                args.push("-filter_complex".to_string());
                args.push(overlay_filter(screen, camera));
                args.push("-map".to_string());
                args.push("[out]".to_string());
            }
            (Some(index), None) | (None, Some(index)) => {
                args.push("-map".to_string());
                args.push(format!("{}:v", index));
            }
            (None, None) => {}
        }

        if let Some(audio) = indexes.audio {
            args.push("-map".to_string());
            args.push(format!("{}:a", audio));
        }

        if plan.has_video() {
            args.extend(plan.screen_args.iter().cloned());
        }
        if plan.audio.is_some() {
            args.extend(plan.audio_args.iter().cloned());
        }
        args.extend(plan.output_args.iter().cloned());
        args.push(output.to_string());

        Ok(Self::new(plan.program.clone(), args))
    }

    /// Render as a single shell-safe line (what `--dry` prints)
    pub fn render(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn push_linux_inputs(plan: &CapturePlan, args: &mut Vec<String>) -> Result<InputIndexes, CommandError> {
    let mut indexes = InputIndexes::default();
    let mut next = 0;

    if let Some(screen) = &plan.screen {
        let geometry = screen
            .geometry
            .ok_or_else(|| CommandError::MissingGeometry(screen.name.clone()))?;
        args.extend([
            "-f".to_string(),
            "x11grab".to_string(),
            "-framerate".to_string(),
            plan.framerate.to_string(),
            "-video_size".to_string(),
            geometry.video_size(),
            "-i".to_string(),
            screen.input.clone(),
        ]);
        indexes.screen = Some(next);
        next += 1;
    }

    if let Some(camera) = &plan.camera {
        args.extend(["-f".to_string(), "v4l2".to_string()]);
        args.extend(plan.camera_args.iter().cloned());
        args.extend(["-i".to_string(), camera.input.clone()]);
        indexes.camera = Some(next);
        next += 1;
    }

    if let Some(audio) = &plan.audio {
        args.extend([
            "-f".to_string(),
            "alsa".to_string(),
            "-i".to_string(),
            audio.input.clone(),
        ]);
        indexes.audio = Some(next);
    }

    Ok(indexes)
}

/// avfoundation takes video and audio in one `video:audio` input
fn push_avfoundation_inputs(plan: &CapturePlan, args: &mut Vec<String>) -> InputIndexes {
    let mut indexes = InputIndexes::default();
    let mut next = 0;

    if let Some(screen) = &plan.screen {
        let audio = plan.audio.as_ref().map_or("none", |a| a.input.as_str());
        args.extend([
            "-f".to_string(),
            "avfoundation".to_string(),
            "-framerate".to_string(),
            plan.framerate.to_string(),
            "-capture_cursor".to_string(),
            "1".to_string(),
            "-i".to_string(),
            format!("{}:{}", screen.input, audio),
        ]);
        indexes.screen = Some(next);
        if plan.audio.is_some() {
            indexes.audio = Some(next);
        }
        next += 1;
    }

    if let Some(camera) = &plan.camera {
        args.extend([
            "-f".to_string(),
            "avfoundation".to_string(),
            "-framerate".to_string(),
            plan.framerate.to_string(),
        ]);
        args.extend(plan.camera_args.iter().cloned());
        args.extend(["-i".to_string(), format!("{}:none", camera.input)]);
        indexes.camera = Some(next);
        next += 1;
    }

    if let (Some(audio), None) = (&plan.audio, &plan.screen) {
        args.extend([
            "-f".to_string(),
            "avfoundation".to_string(),
            "-i".to_string(),
            format!("none:{}", audio.input),
        ]);
        indexes.audio = Some(next);
    }

    indexes
}

fn overlay_filter(screen: usize, camera: usize) -> String {
    format!(
        "[{camera}:v]scale={width}:-1[cam];[{screen}:v][cam]overlay=main_w-overlay_w-{margin}:main_h-overlay_h-{margin}[out]",
        camera = camera,
        screen = screen,
        width = CAMERA_OVERLAY_WIDTH,
        margin = CAMERA_OVERLAY_MARGIN,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::{DeviceKind, Geometry};

    fn screen() -> CaptureDevice {
        CaptureDevice::new(DeviceKind::Screen, 0, "eDP-1", ":0+0,0")
            .with_geometry(Geometry::new(1920, 1080, 0, 0))
    }

    fn mic() -> CaptureDevice {
        CaptureDevice::new(DeviceKind::Audio, 0, "HDA Intel PCH: ALC3246 Analog", "hw:0,0")
    }

    fn webcam() -> CaptureDevice {
        CaptureDevice::new(DeviceKind::Camera, 0, "Integrated Camera", "/dev/video0")
    }

    fn plan(platform: Platform) -> CapturePlan {
        CapturePlan {
            platform,
            program: "ffmpeg".to_string(),
            screen: None,
            audio: None,
            camera: None,
            framerate: DEFAULT_FRAMERATE,
            screen_args: vec!["-c:v".into(), "libx264".into()],
            audio_args: vec!["-c:a".into(), "pcm_s16le".into()],
            camera_args: vec![],
            output_args: vec![],
            output: PathBuf::from("out.mkv"),
        }
    }

    fn words(line: &str) -> Vec<String> {
        line.split(' ').map(str::to_string).collect()
    }

    #[test]
    fn nothing_selected_is_an_error() {
        assert_eq!(
            CaptureCommand::build(&plan(Platform::Linux)),
            Err(CommandError::NothingToCapture)
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_output_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let plan = CapturePlan {
            screen: Some(screen()),
            output: PathBuf::from(OsStr::from_bytes(b"/tmp/caf\xe9.mkv")),
            ..plan(Platform::Linux)
        };

        assert!(matches!(
            CaptureCommand::build(&plan),
            Err(CommandError::NonUtf8Output(_))
        ));
    }

    #[test]
    fn linux_screen_only() {
        let plan = CapturePlan {
            screen: Some(screen()),
            ..plan(Platform::Linux)
        };
        let command = CaptureCommand::build(&plan).unwrap();
        assert_eq!(command.program, "ffmpeg");
        assert_eq!(
            command.args,
            words("-f x11grab -framerate 30 -video_size 1920x1080 -i :0+0,0 -map 0:v -c:v libx264 out.mkv")
        );
    }

    #[test]
    fn linux_screen_without_geometry_fails() {
        let plan = CapturePlan {
            screen: Some(CaptureDevice::new(DeviceKind::Screen, 0, "odd", ":0")),
            ..plan(Platform::Linux)
        };
        assert_eq!(
            CaptureCommand::build(&plan),
            Err(CommandError::MissingGeometry("odd".to_string()))
        );
    }

    #[test]
    fn linux_screen_camera_and_audio() {
        let plan = CapturePlan {
            screen: Some(screen()),
            audio: Some(mic()),
            camera: Some(webcam()),
            camera_args: vec!["-video_size".into(), "640x480".into()],
            ..plan(Platform::Linux)
        };
        let command = CaptureCommand::build(&plan).unwrap();
        let line = command.args.join(" ");
        assert!(line.starts_with(
            "-f x11grab -framerate 30 -video_size 1920x1080 -i :0+0,0 \
             -f v4l2 -video_size 640x480 -i /dev/video0 -f alsa -i hw:0,0"
        ));
        assert!(line.contains(
            "-filter_complex [1:v]scale=320:-1[cam];[0:v][cam]overlay=main_w-overlay_w-10:main_h-overlay_h-10[out] -map [out]"
        ));
        assert!(line.ends_with("-map 2:a -c:v libx264 -c:a pcm_s16le out.mkv"));
    }

    #[test]
    fn audio_only_skips_video_args() {
        let plan = CapturePlan {
            audio: Some(mic()),
            ..plan(Platform::Linux)
        };
        let command = CaptureCommand::build(&plan).unwrap();
        assert_eq!(
            command.args,
            words("-f alsa -i hw:0,0 -map 0:a -c:a pcm_s16le out.mkv")
        );
    }

    #[test]
    fn camera_only_maps_camera_video() {
        let plan = CapturePlan {
            camera: Some(webcam()),
            ..plan(Platform::Linux)
        };
        let command = CaptureCommand::build(&plan).unwrap();
        assert_eq!(
            command.args,
            words("-f v4l2 -i /dev/video0 -map 0:v -c:v libx264 out.mkv")
        );
    }

    #[test]
    fn macos_screen_and_audio_share_an_input() {
        let plan = CapturePlan {
            screen: Some(CaptureDevice::new(DeviceKind::Screen, 0, "Capture screen 0", "1")),
            audio: Some(CaptureDevice::new(DeviceKind::Audio, 0, "Built-in Microphone", "0")),
            ..plan(Platform::MacOs)
        };
        let command = CaptureCommand::build(&plan).unwrap();
        assert_eq!(
            command.args,
            words("-f avfoundation -framerate 30 -capture_cursor 1 -i 1:0 -map 0:v -map 0:a -c:v libx264 -c:a pcm_s16le out.mkv")
        );
    }

    #[test]
    fn macos_audio_only_uses_none_video() {
        let plan = CapturePlan {
            audio: Some(CaptureDevice::new(DeviceKind::Audio, 0, "Built-in Microphone", "0")),
            ..plan(Platform::MacOs)
        };
        let command = CaptureCommand::build(&plan).unwrap();
        assert_eq!(
            command.args,
            words("-f avfoundation -i none:0 -map 0:a -c:a pcm_s16le out.mkv")
        );
    }

    #[test]
    fn macos_camera_overlay() {
        let plan = CapturePlan {
            screen: Some(CaptureDevice::new(DeviceKind::Screen, 0, "Capture screen 0", "2")),
            camera: Some(CaptureDevice::new(DeviceKind::Camera, 0, "FaceTime HD Camera", "0")),
            ..plan(Platform::MacOs)
        };
        let command = CaptureCommand::build(&plan).unwrap();
        let line = command.args.join(" ");
        assert!(line.contains("-i 2:none"));
        assert!(line.contains("-f avfoundation -framerate 30 -i 0:none"));
        assert!(line.contains("-map [out]"));
        assert!(!line.contains(":a"));
    }

    #[test]
    fn output_args_precede_output_file() {
        let plan = CapturePlan {
            screen: Some(screen()),
            output_args: vec!["-t".into(), "10".into()],
            ..plan(Platform::Linux)
        };
        let command = CaptureCommand::build(&plan).unwrap();
        let n = command.args.len();
        assert_eq!(&command.args[n - 3..], ["-t", "10", "out.mkv"]);
    }

    #[test]
    fn render_quotes_where_needed() {
        let command = CaptureCommand::new(
            "ffmpeg",
            vec![
                "-i".to_string(),
                ":0+0,0".to_string(),
                "-map".to_string(),
                "[out]".to_string(),
                "Screencast 2024-01-01 at 10.00.00.mkv".to_string(),
            ],
        );
        assert_eq!(
            command.render(),
            "ffmpeg -i :0+0,0 -map '[out]' 'Screencast 2024-01-01 at 10.00.00.mkv'"
        );
    }
}
