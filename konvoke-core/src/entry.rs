//! Entry-point boundary to the external compiler
//!
//! `CompilerEntryPoint` is the swappable seam between the driver and the
//! tool it drives: one operation, hand over an argument list and wait for
//! the result. Production uses `ProcessEntryPoint`; tests substitute
//! stubs.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::args::ArgumentList;
use crate::error::InvokeError;
use konvoke_config::InvokeConfig;

/// Interval between deadline checks while the tool runs
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Outcome of one successful tool run
///
/// Created after the external call returns; owned by the caller for
/// logging and propagation. `stdout`/`stderr` are empty unless capture
/// was enabled.
#[derive(Clone, Debug)]
pub struct InvocationResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

/// The external tool's callable interface
///
/// Single-shot: implementations hold no state across calls and never
/// retry.
pub trait CompilerEntryPoint {
    /// Name used in logs and error messages
    fn describe(&self) -> String;

    /// Hand the argument list to the tool verbatim and wait for it to
    /// finish
    fn run(&self, args: &ArgumentList) -> Result<InvocationResult, InvokeError>;
}

/// Entry point backed by a subprocess
///
/// The child inherits the parent environment (toolchain home, library
/// search path, encoding stay whatever the caller set up) plus the
/// entries from `InvokeConfig::env`, forwarded verbatim.
pub struct ProcessEntryPoint {
    program: String,
    config: InvokeConfig,
}

impl ProcessEntryPoint {
    pub fn new(program: impl Into<String>, config: InvokeConfig) -> Self {
        ProcessEntryPoint {
            program: program.into(),
            config,
        }
    }

    fn unavailable(&self, source: io::Error) -> InvokeError {
        InvokeError::ToolUnavailable {
            tool: self.program.clone(),
            source,
        }
    }

    /// Poll the child until it exits or the deadline passes; on expiry
    /// the child is killed and reaped before `Timeout` is returned.
    fn wait_with_deadline(
        &self,
        child: &mut Child,
        limit: Duration,
    ) -> Result<ExitStatus, InvokeError> {
        let deadline = Instant::now() + limit;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        warn!(
                            target: "konvoke::invoker",
                            "`{}` exceeded {}s, killing",
                            self.program,
                            limit.as_secs()
                        );
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(InvokeError::Timeout {
                            tool: self.program.clone(),
                            limit,
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(self.unavailable(source));
                }
            }
        }
    }
}

impl CompilerEntryPoint for ProcessEntryPoint {
    fn describe(&self) -> String {
        self.program.clone()
    }

    fn run(&self, args: &ArgumentList) -> Result<InvocationResult, InvokeError> {
        let mut command = Command::new(&self.program);
        command.args(args.iter());
        for (key, value) in &self.config.env {
            command.env(key, value);
        }
        if self.config.capture_output {
            command.stdout(Stdio::piped()).stderr(Stdio::piped());
        }

        debug!(
            target: "konvoke::invoker",
            "spawning `{}` with {} tokens",
            self.program,
            args.len()
        );
        let started = Instant::now();
        let mut child = command.spawn().map_err(|source| self.unavailable(source))?;

        // Drain on threads so a chatty child can't deadlock against a
        // full pipe while we wait.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.config.timeout() {
            Some(limit) => self.wait_with_deadline(&mut child, limit)?,
            None => child.wait().map_err(|source| self.unavailable(source))?,
        };

        let stdout = collect(stdout);
        let stderr = collect(stderr);
        let elapsed = started.elapsed();
        // Killed-by-signal has no code; report -1.
        let code = status.code().unwrap_or(-1);

        if status.success() {
            Ok(InvocationResult {
                exit_code: code,
                stdout,
                stderr,
                elapsed,
            })
        } else {
            Err(InvokeError::CompilationFailed {
                tool: self.program.clone(),
                code,
                stderr,
            })
        }
    }
}

fn drain<R: Read + Send + 'static>(stream: Option<R>) -> Option<thread::JoinHandle<String>> {
    stream.map(|mut stream| {
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = stream.read_to_string(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
