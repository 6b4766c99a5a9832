//! CLI configuration
//!
//! CLI-specific configuration: the per-phase log levels.

use tracing::Level;

/// CLI log configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub builder: Option<Level>,
    pub invoker: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::INFO,
            builder: None,
            invoker: None,
        }
    }
}

impl LogConfig {
    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        match target {
            "konvoke::builder" => self.builder.unwrap_or(self.global),
            "konvoke::invoker" => self.invoker.unwrap_or(self.global),
            _ => self.global,
        }
    }
}
