//! Konvoke Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Konvoke
//! crates: which compiler to drive, which flags one invocation carries,
//! and how the child process is supervised.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Compiler command used when a project file names none.
pub const DEFAULT_TOOL: &str = "konanc";

/// Memory model selected with `-memory-model`
///
/// The driven toolchain ships exactly two runtime flavors; absent means
/// the tool picks its own default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryModel {
    Strict,
    Relaxed,
}

impl MemoryModel {
    /// Token value passed after the `-memory-model` flag
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryModel::Strict => "strict",
            MemoryModel::Relaxed => "relaxed",
        }
    }
}

/// Artifact kind selected with `-p`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Program,
    Static,
    Dynamic,
    Framework,
    Library,
}

impl OutputKind {
    /// Token value passed after the `-p` flag
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Program => "program",
            OutputKind::Static => "static",
            OutputKind::Dynamic => "dynamic",
            OutputKind::Framework => "framework",
            OutputKind::Library => "library",
        }
    }
}

/// Options for one compiler invocation
///
/// Immutable value object: created by the caller, consumed once by the
/// argument builder. Field order mirrors the flag order of the driven
/// tool's command line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Source file handed to the tool
    pub source: PathBuf,
    /// Memory model, `None` leaves the tool's default in place
    pub memory_model: Option<MemoryModel>,
    /// Verbose tool output
    pub verbose: bool,
    /// Suppress entry point generation (`-nomain`)
    pub no_main: bool,
    /// Artifact kind, `None` leaves the tool's default in place
    pub produce: Option<OutputKind>,
    /// Emit debug information (`-g`)
    pub debug_info: bool,
    /// Output path handed to the tool
    pub output: PathBuf,
}

/// Supervision settings for the child process
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvokeConfig {
    /// Capture the tool's stdout/stderr instead of inheriting the terminal
    pub capture_output: bool,
    /// Kill the tool after this many seconds, `None` waits forever
    pub timeout_secs: Option<u64>,
    /// Environment entries forwarded verbatim to the child, on top of the
    /// inherited parent environment. Never validated here.
    pub env: BTreeMap<String, String>,
}

impl InvokeConfig {
    /// Timeout as a `Duration`, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Pipeline phase enum for phase-specific error reporting and logging
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Project,
    Builder,
    Invoker,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Project => "project",
            Phase::Builder => "builder",
            Phase::Invoker => "invoker",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("konvoke::{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_compile_options() {
        let opts = CompileOptions::default();
        assert!(opts.source.as_os_str().is_empty());
        assert!(opts.memory_model.is_none());
        assert!(!opts.verbose);
        assert!(!opts.no_main);
        assert!(opts.produce.is_none());
        assert!(!opts.debug_info);
        assert!(opts.output.as_os_str().is_empty());
    }

    #[test]
    fn test_default_invoke_config() {
        let cfg = InvokeConfig::default();
        assert!(!cfg.capture_output);
        assert_eq!(cfg.timeout(), None);
        assert!(cfg.env.is_empty());
    }

    #[test]
    fn test_invoke_config_timeout() {
        let cfg = InvokeConfig {
            timeout_secs: Some(600),
            ..Default::default()
        };
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_flag_values() {
        assert_eq!(MemoryModel::Strict.as_str(), "strict");
        assert_eq!(MemoryModel::Relaxed.as_str(), "relaxed");
        assert_eq!(OutputKind::Framework.as_str(), "framework");
        assert_eq!(OutputKind::Program.as_str(), "program");
    }

    #[test]
    fn test_phase_as_str() {
        assert_eq!(Phase::Builder.as_str(), "builder");
        assert_eq!(Phase::Invoker.target(), "konvoke::invoker");
    }

    #[test]
    fn test_enums_deserialize_lowercase() {
        let model: MemoryModel = serde_json::from_str("\"relaxed\"").unwrap();
        assert_eq!(model, MemoryModel::Relaxed);
        let kind: OutputKind = serde_json::from_str("\"framework\"").unwrap();
        assert_eq!(kind, OutputKind::Framework);
    }
}
