//! Configuration value objects

mod app_config;

pub use app_config::{AppConfig, DEFAULT_AUDIO_ARGS, DEFAULT_SCREEN_ARGS};
