//! Unified script execution interface and shared types.
//!
//! Defines [`ScriptExecutor`], the trait that both runtime executors
//! implement, along with [`ScriptInput`], [`ScriptOutput`], and
//! [`ScriptError`].

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input passed to a script executor.
#[derive(Debug, Clone)]
pub struct ScriptInput {
    /// Arguments appended after the script path, one argv element each.
    /// Nothing is ever joined into a shell string.
    pub args: Vec<String>,
    /// Working directory for the child process (uses current dir if `None`).
    pub working_directory: Option<String>,
    /// Maximum wall-clock time before the process is killed.
    pub timeout: Duration,
    /// Maximum bytes accepted on stdout or stderr before the run is
    /// rejected.
    pub max_output_bytes: usize,
}

/// Captured output from a script execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptOutput {
    /// Complete stdout captured from the process.
    pub stdout: String,
    /// Complete stderr captured from the process.
    pub stderr: String,
    /// Process exit code (`-1` if killed by signal).
    pub exit_code: i32,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Stdout parsed as JSON, or `None` if stdout is not valid JSON.
    pub parsed_output: Option<Value>,
}

impl ScriptOutput {
    /// Whether the process exited with code 0.
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Errors that can occur during script execution.
#[derive(Debug)]
pub enum ScriptError {
    /// The script file was not found at the specified path.
    NotFound(String),
    /// The script exceeded its configured timeout and was killed.
    Timeout {
        /// Elapsed wall-clock time before the process was killed.
        elapsed_ms: u64,
    },
    /// The script wrote more than the configured cap to one of its streams.
    OutputLimitExceeded {
        /// `"stdout"` or `"stderr"`.
        stream: &'static str,
        /// The cap in bytes.
        limit: usize,
    },
    /// An I/O error occurred while spawning or communicating with the process.
    IoError(std::io::Error),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Script not found: {path}"),
            Self::Timeout { elapsed_ms } => {
                write!(f, "Script timed out after {elapsed_ms}ms")
            }
            Self::OutputLimitExceeded { stream, limit } => {
                write!(f, "Script {stream} exceeded {limit} bytes")
            }
            Self::IoError(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}

/// Trait implemented by all script runtime executors (python, shell).
///
/// Each executor receives a file path and structured input, spawns the
/// appropriate subprocess, and returns structured output or an error.
/// A non-zero exit code is *not* an error at this level; callers decide
/// what it means.
pub trait ScriptExecutor: Send + Sync {
    /// Execute the script at `script_path` with the given `input`.
    fn execute(
        &self,
        script_path: &str,
        input: ScriptInput,
    ) -> impl std::future::Future<Output = Result<ScriptOutput, ScriptError>> + Send;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
