//! External tool lookup port

use async_trait::async_trait;

/// Port for checking whether an external program can be run
#[async_trait]
pub trait ToolLocator: Send + Sync {
    /// True when `tool` resolves to an executable on this system
    async fn is_available(&self, tool: &str) -> bool;
}
