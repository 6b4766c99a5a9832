//! CLI formatted output
//!
//! Command-line friendly error display, with the tool's captured
//! diagnostics printed as context.

use konvoke_api::KonvokeError;

/// Print an error and any captured tool diagnostics
pub fn print_error(e: &KonvokeError) {
    eprintln!("❌ {}", e.to_report());

    if let Some(stderr) = e.stderr() {
        print_stderr_context(stderr);
    }
}

/// Print the tail of the tool's stderr (the last lines carry the actual
/// diagnostic)
pub fn print_stderr_context(stderr: &str) {
    const CONTEXT_LINES: usize = 20;

    let lines: Vec<&str> = stderr.lines().collect();
    let start = lines.len().saturating_sub(CONTEXT_LINES);

    eprintln!("----|--");
    if start > 0 {
        eprintln!("    | ... {} earlier lines omitted", start);
    }
    for line in &lines[start..] {
        eprintln!("    | {}", line);
    }
    eprintln!("----|--");
}
