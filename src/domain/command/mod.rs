//! Capture command assembly

mod arguments;
mod capture_command;
mod output;

pub use arguments::{quote_arg, split_args};
pub use capture_command::{
    CaptureCommand, CapturePlan, CAMERA_OVERLAY_MARGIN, CAMERA_OVERLAY_WIDTH, DEFAULT_FRAMERATE,
};
pub use output::{default_file_name, output_path, Extension, DEFAULT_EXTENSION};
