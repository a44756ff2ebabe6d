//! Command runner adapters

mod ffmpeg;

pub use ffmpeg::FfmpegRunner;
