//! Test helpers
//!
//! Fixtures shared by the integration suites.

use konvoke_config::{CompileOptions, MemoryModel, OutputKind};

/// Options exercising every field of the grammar
pub fn full_options() -> CompileOptions {
    CompileOptions {
        source: "/work/libs/zee/src/nativeMain/kotlin/hello.kt".into(),
        memory_model: Some(MemoryModel::Relaxed),
        verbose: true,
        no_main: true,
        produce: Some(OutputKind::Framework),
        debug_info: true,
        output: "/work/libs/zee/build/objs/Test".into(),
    }
}

/// Options carrying only the mandatory paths
pub fn minimal_options() -> CompileOptions {
    CompileOptions {
        source: "/work/hello.kt".into(),
        output: "/work/build/hello".into(),
        ..Default::default()
    }
}
