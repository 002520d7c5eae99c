//! Python script executor.
//!
//! Runs `<interpreter> <script> <args...>` directly, without a shell. The
//! interpreter defaults to `python` and can point at a virtualenv binary.

use super::executor::{ScriptError, ScriptExecutor, ScriptInput, ScriptOutput};
use super::subprocess;

/// Default interpreter looked up on `PATH`.
pub const DEFAULT_INTERPRETER: &str = "python";

/// Executor for Python scripts.
pub struct PythonExecutor {
    /// Interpreter program, e.g. `python3` or `/opt/venv/bin/python`.
    interpreter: String,
}

impl PythonExecutor {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

impl Default for PythonExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER)
    }
}

impl ScriptExecutor for PythonExecutor {
    async fn execute(
        &self,
        script_path: &str,
        input: ScriptInput,
    ) -> Result<ScriptOutput, ScriptError> {
        super::ensure_script_exists(script_path, input.working_directory.as_deref()).await?;

        let mut cmd = tokio::process::Command::new(&self.interpreter);
        cmd.arg(script_path);
        subprocess::run_command(&mut cmd, input).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
