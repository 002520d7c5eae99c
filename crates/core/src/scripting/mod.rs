//! Subprocess execution for the external scorer.
//!
//! Provides executor types for the Python and shell runtimes. Everything
//! here is pure process management (no DB access, no HTTP) so it can be
//! exercised with throwaway scripts in tests.

pub mod executor;
pub mod python;
pub mod shell;
pub mod subprocess;

use std::path::{Path, PathBuf};

use executor::ScriptError;

/// Runtime name for scripts run through a Python interpreter.
pub const RUNTIME_PYTHON: &str = "python";

/// Runtime name for scripts run through `bash`.
pub const RUNTIME_SHELL: &str = "shell";

/// Where the child will find `script_path` once started in
/// `working_directory`. Absolute paths are returned unchanged.
pub fn resolve_script_path(script_path: &str, working_directory: Option<&str>) -> PathBuf {
    match working_directory {
        Some(dir) => Path::new(dir).join(script_path),
        None => PathBuf::from(script_path),
    }
}

/// Fail with [`ScriptError::NotFound`] unless the resolved script exists.
pub(crate) async fn ensure_script_exists(
    script_path: &str,
    working_directory: Option<&str>,
) -> Result<(), ScriptError> {
    let resolved = resolve_script_path(script_path, working_directory);
    if tokio::fs::metadata(&resolved).await.is_err() {
        return Err(ScriptError::NotFound(resolved.display().to_string()));
    }
    Ok(())
}
