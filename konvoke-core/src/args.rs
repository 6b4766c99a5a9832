//! Argument list construction
//!
//! Serializes `CompileOptions` into the fixed flag grammar of the driven
//! tool. Pure logic: no side effects, identical options always yield
//! identical token lists.
//!
//! Grammar (order fixed):
//!
//! ```text
//! <source-path> [-memory-model <strict|relaxed>] [-verbose] [-nomain]
//!               [-p <output-kind>] [-g] -o <output-path>
//! ```

use crate::error::OptionsError;
use konvoke_config::CompileOptions;
use std::path::Path;

/// Ordered token sequence for one invocation
///
/// Freshly allocated per invocation, never shared. Every option occupies
/// its own token and paths stay single tokens regardless of embedded
/// whitespace; the list is handed to the entry point verbatim, with no
/// re-splitting anywhere.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArgumentList(Vec<String>);

impl ArgumentList {
    /// Wrap an already-serialized token sequence
    ///
    /// For callers driving a custom entry point; `build_arguments` is the
    /// normal way to obtain a list.
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        ArgumentList(tokens.into_iter().map(Into::into).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl std::fmt::Display for ArgumentList {
    /// Space-joined form for logs only; the invoker always passes tokens
    /// individually
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Serialize options into the tool's argument list
///
/// Each populated field maps to zero, one, or two tokens in the grammar
/// order above; absent or false fields emit nothing. The `-o <output>`
/// pair is always last.
pub fn build_arguments(options: &CompileOptions) -> Result<ArgumentList, OptionsError> {
    if options.source.as_os_str().is_empty() {
        return Err(OptionsError::EmptySourcePath);
    }
    if options.output.as_os_str().is_empty() {
        return Err(OptionsError::EmptyOutputPath);
    }

    let mut tokens: Vec<String> = Vec::with_capacity(10);
    tokens.push(path_token(&options.source));
    if let Some(model) = options.memory_model {
        tokens.push("-memory-model".to_string());
        tokens.push(model.as_str().to_string());
    }
    if options.verbose {
        tokens.push("-verbose".to_string());
    }
    if options.no_main {
        tokens.push("-nomain".to_string());
    }
    if let Some(kind) = options.produce {
        tokens.push("-p".to_string());
        tokens.push(kind.as_str().to_string());
    }
    if options.debug_info {
        tokens.push("-g".to_string());
    }
    tokens.push("-o".to_string());
    tokens.push(path_token(&options.output));

    Ok(ArgumentList(tokens))
}

/// One path, one token. The list is a `Vec<String>`, so non-UTF-8 paths
/// are carried lossily.
fn path_token(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
