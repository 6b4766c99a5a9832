//! API layer configuration
//!
//! Holds the drive configuration `RunConfig` and the global singleton
//! (for CLI use).

use konvoke_config::{InvokeConfig, DEFAULT_TOOL};
use once_cell::sync::OnceCell;

/// Drive configuration
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Compiler command to invoke
    pub tool: String,
    /// Print the serialized argument list before invoking
    pub show_arguments: bool,
    /// Serialize the argument list but skip the invocation
    pub build_only: bool,
    /// Child process supervision
    pub invoke: InvokeConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            show_arguments: false,
            build_only: false,
            invoke: InvokeConfig::default(),
        }
    }
}

// Global config singleton for CLI convenience
static GLOBAL_CONFIG: OnceCell<RunConfig> = OnceCell::new();

/// Initialize global configuration (must be called once before any operation)
///
/// # Panics
/// If config is already initialized
pub fn init(config: RunConfig) {
    GLOBAL_CONFIG
        .set(config)
        .expect("Config already initialized");
}

/// Get global config reference
///
/// # Panics
/// If config is not initialized
pub fn config() -> &'static RunConfig {
    GLOBAL_CONFIG.get().expect("Config not initialized")
}

/// Check if config is initialized
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_config() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.tool, "konanc");
        assert!(!cfg.show_arguments);
        assert!(!cfg.build_only);
        assert!(!cfg.invoke.capture_output);
        assert_eq!(cfg.invoke.timeout(), None);
    }

    #[test]
    fn test_run_config_clone() {
        let cfg = RunConfig {
            tool: "konanc-test".to_string(),
            ..Default::default()
        };
        let cloned = cfg.clone();
        assert_eq!(cfg.tool, cloned.tool);
        assert_eq!(cfg.build_only, cloned.build_only);
    }

    #[test]
    fn test_global_config_init_and_get() {
        // Global state: only exercise the transition when this test runs
        // first in the process.
        if !is_initialized() {
            let cfg = RunConfig::default();
            let tool = cfg.tool.clone();
            init(cfg);
            assert!(is_initialized());
            assert_eq!(config().tool, tool);
        }
    }

    #[test]
    fn test_is_initialized_is_callable() {
        let _ = is_initialized();
    }
}
