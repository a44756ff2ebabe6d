//! `which`-based tool locator

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::ToolLocator;

/// Resolves tools through the system `which` command
#[derive(Debug, Clone, Copy, Default)]
pub struct WhichToolLocator;

impl WhichToolLocator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolLocator for WhichToolLocator {
    async fn is_available(&self, tool: &str) -> bool {
        let found = Command::new("which")
            .arg(tool)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false);
        tracing::trace!(tool, found, "Tool lookup");
        found
    }
}
