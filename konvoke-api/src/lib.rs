//! Konvoke API - Drive orchestration layer
//!
//! Provides the unified drive interface, including:
//! - Pipeline orchestration (options -> argument list -> invocation)
//! - Configuration abstraction (RunConfig)
//! - Unified error handling (KonvokeError)
//!
//! For CLI convenience, this crate provides a global singleton API.
//! For library use, prefer the explicit `compile_with_config(options, &config)` API.

use tracing::{debug, info};

// Re-export config
pub mod config;
pub use config::{config as get_config, init as init_config, is_initialized, RunConfig};

// Re-export error types
pub mod error;
pub use error::{ErrorReport, KonvokeError};

// Re-export core and vocabulary types
pub use konvoke_config;
pub use konvoke_config::{CompileOptions, InvokeConfig, MemoryModel, OutputKind, Phase};
pub use konvoke_core::{
    build_arguments, ArgumentList, CompilerEntryPoint, InvocationResult, InvokeError,
    OptionsError, ProcessEntryPoint,
};

/// Compile with explicit configuration
///
/// This is the recommended API for library users: serializes the
/// options, spawns `config.tool`, and surfaces the result.
pub fn compile_with_config(
    options: &CompileOptions,
    config: &RunConfig,
) -> Result<InvocationResult, KonvokeError> {
    let entry = ProcessEntryPoint::new(config.tool.clone(), config.invoke.clone());
    compile_with_entry_point(options, &entry)
}

/// Compile against a caller-supplied entry point
///
/// The invocation seam: tests and in-process tools substitute their own
/// `CompilerEntryPoint` here and get the identical pipeline.
pub fn compile_with_entry_point(
    options: &CompileOptions,
    entry: &dyn CompilerEntryPoint,
) -> Result<InvocationResult, KonvokeError> {
    let arguments = build_arguments(options)?;
    debug!(
        target: "konvoke::builder",
        "serialized {} tokens: {}",
        arguments.len(),
        arguments
    );

    info!(target: "konvoke::invoker", "invoking {}", entry.describe());
    let result = entry.run(&arguments)?;
    info!(
        target: "konvoke::invoker",
        "finished in {:.1?} with exit code {}",
        result.elapsed,
        result.exit_code
    );
    Ok(result)
}

// ==================== Global-config API (CLI convenience) ====================

/// Compile using the global config
///
/// # Panics
/// If global config is not initialized
pub fn compile(options: &CompileOptions) -> Result<InvocationResult, KonvokeError> {
    compile_with_config(options, get_config())
}

/// Quick compile with default config (auto-initializes if needed)
pub fn quick_compile(options: &CompileOptions) -> Result<InvocationResult, KonvokeError> {
    if !is_initialized() {
        init_config(RunConfig::default());
    }
    compile(options)
}
