//! Error types (core layer)
//!
//! Split along the pipeline boundary: `OptionsError` is raised before
//! anything is invoked, `InvokeError` only once an entry point exists.
//! A failed compilation is not transient, so nothing here is retried.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Malformed options, rejected before invocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// Source path was empty
    #[error("source path must not be empty")]
    EmptySourcePath,

    /// Output path was empty
    #[error("output path must not be empty")]
    EmptyOutputPath,
}

/// Invocation failure
#[derive(Error, Debug)]
pub enum InvokeError {
    /// The entry point could not be spawned at all
    #[error("failed to invoke `{tool}`: {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The tool ran and reported failure
    #[error("`{tool}` exited with code {code}")]
    CompilationFailed {
        tool: String,
        code: i32,
        /// Captured diagnostics, empty unless capture was enabled
        stderr: String,
    },

    /// The tool exceeded the configured deadline and was killed
    #[error("`{tool}` did not finish within {}s", limit.as_secs())]
    Timeout { tool: String, limit: Duration },
}
