//! Konvoke CLI - Command line interface
//!
//! Project-based execution - all configuration from konvoke.json

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{info, Level};

mod config;
mod logging;
mod platform;

use crate::config::LogConfig;
use crate::logging::LogFormat;
use crate::platform::print_error;
use konvoke_api::{
    build_arguments, compile_with_config, init_config, CompileOptions, KonvokeError, RunConfig,
};
use konvoke_config::{InvokeConfig, MemoryModel, OutputKind};

/// konvoke.json structure
#[derive(Debug, serde::Deserialize)]
struct ProjectFile {
    /// Compiler command (default: konanc)
    tool: Option<String>,
    /// Source file handed to the tool
    source: String,
    /// Output path handed to the tool
    output: String,
    /// Compiler flags
    options: Option<FlagSection>,
    /// Child process supervision
    invoke: Option<InvokeConfig>,
    /// Log level: "silent", "error", "warn", "info", "debug", "trace"
    log_level: Option<String>,
    /// Also append logs to this file
    log_file: Option<String>,
    /// Print the serialized argument list before invoking
    show_arguments: Option<bool>,
    /// Serialize the argument list only, skip the invocation
    build_only: Option<bool>,
}

/// Compiler flag section
#[derive(Debug, serde::Deserialize)]
struct FlagSection {
    memory_model: Option<MemoryModel>,
    verbose: Option<bool>,
    no_main: Option<bool>,
    produce: Option<OutputKind>,
    debug_info: Option<bool>,
}

#[derive(Parser)]
#[command(
    name = "konvoke",
    about = "Structured driver for an external native compiler - project-based execution",
    version = "0.1.0"
)]
struct Cli {
    /// Project file path (default: ./konvoke.json)
    #[arg(value_name = "CONFIG", default_value = "konvoke.json")]
    config: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Read konvoke.json
    let project = match read_project_file(&cli.config) {
        Ok(p) => p,
        Err(e) => {
            print_error(&e);
            process::exit(1);
        }
    };

    // Logging comes up before anything interesting happens
    let level = match resolve_log_level(&project) {
        Ok(level) => level,
        Err(e) => {
            print_error(&e);
            process::exit(1);
        }
    };
    let log_config = LogConfig {
        global: level,
        ..Default::default()
    };
    logging::init_with_file(&log_config, LogFormat::Compact, project.log_file.as_deref());

    // Build options and run configuration from the project file
    let options = build_compile_options(&cli.config, &project);
    let run_config = build_run_config(&project);

    // Initialize API config (global singleton for convenience)
    init_config(run_config.clone());

    // Show the serialized argument list
    if run_config.show_arguments || run_config.build_only {
        match build_arguments(&options) {
            Ok(args) => {
                println!("[Arguments]");
                for token in args.iter() {
                    println!("  {token}");
                }
            }
            Err(e) => {
                print_error(&e.into());
                process::exit(1);
            }
        }
    }

    if run_config.build_only {
        return;
    }

    handle_compile(&options, &run_config);
}

/// Read and parse konvoke.json
fn read_project_file(path: &Path) -> Result<ProjectFile, KonvokeError> {
    if !path.exists() {
        return Err(KonvokeError::Project(format!(
            "'{}' not found\n\nThe current directory is not a konvoke project.\nHint: create '{}' with 'source' and 'output' fields",
            path.display(),
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| KonvokeError::Project(format!("cannot read '{}': {}", path.display(), e)))?;

    let project: ProjectFile = serde_json::from_str(&content).map_err(|e| {
        KonvokeError::Project(format!("failed to parse '{}': {}", path.display(), e))
    })?;

    if project.source.is_empty() {
        return Err(KonvokeError::Project(format!(
            "'source' field in '{}' must not be empty",
            path.display()
        )));
    }
    if project.output.is_empty() {
        return Err(KonvokeError::Project(format!(
            "'output' field in '{}' must not be empty",
            path.display()
        )));
    }

    Ok(project)
}

/// Resolve a project-file path relative to the file's directory
fn resolve_project_path(project_path: &Path, value: &str) -> PathBuf {
    let base_dir = project_path.parent().unwrap_or(Path::new("."));
    base_dir.join(value)
}

/// Build compile options from the project file
fn build_compile_options(project_path: &Path, project: &ProjectFile) -> CompileOptions {
    let flags = project.options.as_ref();

    CompileOptions {
        source: resolve_project_path(project_path, &project.source),
        memory_model: flags.and_then(|f| f.memory_model),
        verbose: flags.and_then(|f| f.verbose).unwrap_or(false),
        no_main: flags.and_then(|f| f.no_main).unwrap_or(false),
        produce: flags.and_then(|f| f.produce),
        debug_info: flags.and_then(|f| f.debug_info).unwrap_or(false),
        output: resolve_project_path(project_path, &project.output),
    }
}

/// Build run configuration from the project file
fn build_run_config(project: &ProjectFile) -> RunConfig {
    let defaults = RunConfig::default();

    RunConfig {
        tool: project.tool.clone().unwrap_or(defaults.tool),
        show_arguments: project.show_arguments.unwrap_or(false),
        build_only: project.build_only.unwrap_or(false),
        invoke: project.invoke.clone().unwrap_or_default(),
    }
}

/// Resolve the configured log level, rejecting unknown names
fn resolve_log_level(project: &ProjectFile) -> Result<Level, KonvokeError> {
    match project.log_level.as_deref() {
        Some(value) => parse_log_level(value).ok_or_else(|| {
            KonvokeError::Project(format!(
                "unknown log level '{value}' (expected silent|error|warn|info|debug|trace)"
            ))
        }),
        None => Ok(Level::INFO),
    }
}

/// Parse log level string
fn parse_log_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "silent" => Some(Level::ERROR), // silent = only errors
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

fn handle_compile(options: &CompileOptions, run_config: &RunConfig) {
    match compile_with_config(options, run_config) {
        Ok(result) => {
            // Relay captured tool output; without capture the tool already
            // wrote to the inherited terminal.
            if !result.stdout.is_empty() {
                print!("{}", result.stdout);
            }
            if !result.stderr.is_empty() {
                eprint!("{}", result.stderr);
            }
            if run_config.show_arguments {
                println!("✅ Compilation successful ({:.1?})", result.elapsed);
            }
            info!(
                target: "konvoke::cli",
                "compilation finished in {:.1?}",
                result.elapsed
            );
        }
        Err(e) => {
            print_error(&e);
            // Propagate the tool's own exit code where it has one
            process::exit(e.exit_code().unwrap_or(1));
        }
    }
}
