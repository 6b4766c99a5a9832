//! API error types
//!
//! Unified error type and structured error reports for the whole
//! pipeline. The taxonomy is fixed: options are rejected before
//! invocation, the tool is unreachable, the tool ran and failed, or the
//! tool was killed on deadline. Nothing is retried.

use konvoke_config::Phase;
use konvoke_core::{InvokeError, OptionsError};
use thiserror::Error;

/// Konvoke error type
#[derive(Error, Debug)]
pub enum KonvokeError {
    /// Rejected options (structured)
    #[error("{0}")]
    Options(#[from] OptionsError),

    /// Invocation failure (structured)
    #[error("{0}")]
    Invoke(#[from] InvokeError),

    /// Project file problems, raised by the CLI layer
    #[error("{0}")]
    Project(String),
}

impl KonvokeError {
    /// Exit code the tool reported, if it ran and failed
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            KonvokeError::Invoke(InvokeError::CompilationFailed { code, .. }) => Some(*code),
            _ => None,
        }
    }

    /// Captured tool diagnostics, if capture was enabled and the tool
    /// wrote any
    pub fn stderr(&self) -> Option<&str> {
        match self {
            KonvokeError::Invoke(InvokeError::CompilationFailed { stderr, .. })
                if !stderr.is_empty() =>
            {
                Some(stderr)
            }
            _ => None,
        }
    }

    /// Pipeline phase that produced the error
    pub fn phase(&self) -> Phase {
        match self {
            KonvokeError::Options(_) => Phase::Builder,
            KonvokeError::Invoke(_) => Phase::Invoker,
            KonvokeError::Project(_) => Phase::Project,
        }
    }

    /// Convert to a structured error report
    ///
    /// The CLI prints it directly; upper layers can serialize it for
    /// tool integration.
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            phase: self.phase().as_str(),
            exit_code: self.exit_code(),
            error_kind: self.kind_name().to_string(),
            message: self.to_string(),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            KonvokeError::Options(OptionsError::EmptySourcePath) => "EmptySourcePath",
            KonvokeError::Options(OptionsError::EmptyOutputPath) => "EmptyOutputPath",
            KonvokeError::Invoke(InvokeError::ToolUnavailable { .. }) => "ToolUnavailable",
            KonvokeError::Invoke(InvokeError::CompilationFailed { .. }) => "CompilationFailed",
            KonvokeError::Invoke(InvokeError::Timeout { .. }) => "Timeout",
            KonvokeError::Project(_) => "ProjectError",
        }
    }
}

/// Structured error report
///
/// Consumers (CLI, build servers) format it to their own needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    /// Pipeline phase: project, builder, invoker
    pub phase: &'static str,
    /// Tool exit code, when the tool ran and failed
    pub exit_code: Option<i32>,
    /// Error kind name (for programmatic handling)
    pub error_kind: String,
    /// Human-readable message
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    /// Default CLI-friendly format
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "[exit {}] {} error: {}", code, self.phase, self.message),
            None => write!(f, "[{}] {} error: {}", self.phase, self.phase, self.message),
        }
    }
}

impl ErrorReport {
    /// Convert to JSON (tool integration)
    ///
    /// Does not depend on serde, builds the JSON string by hand.
    pub fn to_json(&self) -> String {
        let exit_code = self
            .exit_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "null".to_string());

        format!(
            r#"{{"phase":"{}","exit_code":{},"error_kind":"{}","message":"{}"}}"#,
            self.phase,
            exit_code,
            escape_json(&self.error_kind),
            escape_json(&self.message)
        )
    }

    /// Terse form (terminal-friendly)
    pub fn to_short(&self) -> String {
        format!("{}: {}", self.phase, self.message)
    }
}

/// Minimal JSON string escaping
fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::time::Duration;

    #[test]
    fn test_options_error_phase() {
        let err = KonvokeError::from(OptionsError::EmptySourcePath);
        assert_eq!(err.phase(), Phase::Builder);
        assert_eq!(err.exit_code(), None);
        assert_eq!(err.stderr(), None);
    }

    #[test]
    fn test_compilation_failed_exit_code() {
        let err = KonvokeError::from(InvokeError::CompilationFailed {
            tool: "konanc".to_string(),
            code: 1,
            stderr: "error: unresolved reference".to_string(),
        });
        assert_eq!(err.phase(), Phase::Invoker);
        assert_eq!(err.exit_code(), Some(1));
        assert_eq!(err.stderr(), Some("error: unresolved reference"));
    }

    #[test]
    fn test_empty_stderr_is_absent() {
        let err = KonvokeError::from(InvokeError::CompilationFailed {
            tool: "konanc".to_string(),
            code: 1,
            stderr: String::new(),
        });
        assert_eq!(err.stderr(), None);
    }

    #[test]
    fn test_tool_unavailable_to_report() {
        let err = KonvokeError::from(InvokeError::ToolUnavailable {
            tool: "konanc".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        });
        let report = err.to_report();
        assert_eq!(report.phase, "invoker");
        assert_eq!(report.exit_code, None);
        assert_eq!(report.error_kind, "ToolUnavailable");
        assert!(report.message.contains("konanc"));
    }

    #[test]
    fn test_timeout_to_report() {
        let err = KonvokeError::from(InvokeError::Timeout {
            tool: "konanc".to_string(),
            limit: Duration::from_secs(600),
        });
        let report = err.to_report();
        assert_eq!(report.error_kind, "Timeout");
        assert!(report.message.contains("600s"));
    }

    #[test]
    fn test_project_error() {
        let err = KonvokeError::Project("missing 'source' field".to_string());
        assert_eq!(err.phase(), Phase::Project);
        let report = err.to_report();
        assert_eq!(report.phase, "project");
        assert_eq!(report.error_kind, "ProjectError");
    }

    #[test]
    fn test_report_display_with_exit_code() {
        let report = ErrorReport {
            phase: "invoker",
            exit_code: Some(1),
            error_kind: "CompilationFailed".to_string(),
            message: "`konanc` exited with code 1".to_string(),
        };
        let display = format!("{}", report);
        assert!(display.contains("[exit 1]"));
        assert!(display.contains("invoker"));
        assert!(display.contains("exited with code 1"));
    }

    #[test]
    fn test_report_display_without_exit_code() {
        let report = ErrorReport {
            phase: "builder",
            exit_code: None,
            error_kind: "EmptySourcePath".to_string(),
            message: "source path must not be empty".to_string(),
        };
        let display = format!("{}", report);
        assert!(display.contains("[builder]"));
        assert!(display.contains("builder error"));
    }

    #[test]
    fn test_report_to_json() {
        let report = ErrorReport {
            phase: "invoker",
            exit_code: Some(2),
            error_kind: "CompilationFailed".to_string(),
            message: "`konanc` exited with code 2".to_string(),
        };
        let json = report.to_json();
        assert!(json.contains("\"phase\":\"invoker\""));
        assert!(json.contains("\"exit_code\":2"));
        assert!(json.contains("\"error_kind\":\"CompilationFailed\""));
    }

    #[test]
    fn test_report_to_json_null_exit_code() {
        let report = ErrorReport {
            phase: "project",
            exit_code: None,
            error_kind: "ProjectError".to_string(),
            message: "malformed".to_string(),
        };
        assert!(report.to_json().contains("\"exit_code\":null"));
    }

    #[test]
    fn test_report_to_short() {
        let report = ErrorReport {
            phase: "builder",
            exit_code: None,
            error_kind: "EmptyOutputPath".to_string(),
            message: "output path must not be empty".to_string(),
        };
        assert_eq!(report.to_short(), "builder: output path must not be empty");
    }

    #[test]
    fn test_escape_json() {
        assert_eq!(escape_json("plain"), "plain");
        assert_eq!(escape_json("a\"b"), "a\\\"b");
        assert_eq!(escape_json("a\\b"), "a\\\\b");
        assert_eq!(escape_json("a\nb"), "a\\nb");
        assert_eq!(escape_json("a\tb"), "a\\tb");
        assert_eq!(escape_json("a\rb"), "a\\rb");
    }

    #[test]
    fn test_report_to_json_with_special_chars() {
        let report = ErrorReport {
            phase: "invoker",
            exit_code: Some(1),
            error_kind: "CompilationFailed".to_string(),
            message: "line1\nline2\t\"quoted\"".to_string(),
        };
        let json = report.to_json();
        assert!(json.contains("\\n"));
        assert!(json.contains("\\t"));
        assert!(json.contains("\\\""));
    }
}
