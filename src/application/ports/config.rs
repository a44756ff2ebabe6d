//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for the persisted default knobs
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored defaults.
    /// A missing file yields an empty config, not an error.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Overwrite the stored defaults
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the config file
    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write a file holding every default value.
    /// Fails if file already exists.
    async fn init(&self) -> Result<(), ConfigError>;
}
