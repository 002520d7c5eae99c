//! Invocation of the external recommendation scorer.
//!
//! The [`Scorer`] turns a [`ResolvedRequest`] into an argument vector,
//! dispatches it to the configured runtime executor, and classifies the
//! outcome:
//!
//! - exit 0 with JSON on stdout → the JSON, untouched;
//! - exit 0 with anything else → [`RecommendError::ScorerOutput`];
//! - non-zero exit, timeout, oversized output, spawn failure →
//!   [`RecommendError::ScorerExecution`].

use std::str::FromStr;
use std::time::Duration;

use serde_json::Value;

use crate::recommendation::{RecommendError, ResolvedRequest};
use crate::scripting::executor::{ScriptError, ScriptExecutor, ScriptInput, ScriptOutput};
use crate::scripting::python::{PythonExecutor, DEFAULT_INTERPRETER};
use crate::scripting::shell::ShellExecutor;
use crate::scripting::{resolve_script_path, RUNTIME_PYTHON, RUNTIME_SHELL};

/// Wall-clock limit for one scorer run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Cap on captured stdout/stderr per run (1 MiB).
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 1024 * 1024;

/// Scorer script path, relative to the working directory.
pub const DEFAULT_SCRIPT: &str = "check.py";

/// Which executor runs the scorer script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerRuntime {
    Python,
    Shell,
}

impl ScorerRuntime {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Python => RUNTIME_PYTHON,
            Self::Shell => RUNTIME_SHELL,
        }
    }
}

impl FromStr for ScorerRuntime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            RUNTIME_PYTHON => Ok(Self::Python),
            RUNTIME_SHELL => Ok(Self::Shell),
            other => Err(format!(
                "unknown scorer runtime '{other}' (expected '{RUNTIME_PYTHON}' or '{RUNTIME_SHELL}')"
            )),
        }
    }
}

/// How and where the scorer runs.
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    pub runtime: ScorerRuntime,
    /// Interpreter for the Python runtime; ignored by the shell runtime.
    pub interpreter: String,
    pub script_path: String,
    pub working_directory: Option<String>,
    pub timeout: Duration,
    pub max_output_bytes: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            runtime: ScorerRuntime::Python,
            interpreter: DEFAULT_INTERPRETER.to_string(),
            script_path: DEFAULT_SCRIPT.to_string(),
            working_directory: None,
            timeout: DEFAULT_TIMEOUT,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

/// Runs the scorer for recommendation requests.
///
/// Stateless between calls: every request spawns its own child process,
/// nothing is cached and nothing is retried.
pub struct Scorer {
    config: ScorerConfig,
    python_executor: PythonExecutor,
    shell_executor: ShellExecutor,
}

impl Scorer {
    pub fn new(config: ScorerConfig) -> Self {
        let python_executor = PythonExecutor::new(config.interpreter.clone());
        Self {
            config,
            python_executor,
            shell_executor: ShellExecutor,
        }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Whether the scorer script exists where the child process will look
    /// for it.
    pub async fn script_available(&self) -> bool {
        let path = resolve_script_path(
            &self.config.script_path,
            self.config.working_directory.as_deref(),
        );
        tokio::fs::metadata(path).await.is_ok()
    }

    /// Run the scorer for `request` and return its JSON output verbatim.
    pub async fn recommend(&self, request: &ResolvedRequest) -> Result<Value, RecommendError> {
        let input = ScriptInput {
            args: request.to_args(),
            working_directory: self.config.working_directory.clone(),
            timeout: self.config.timeout,
            max_output_bytes: self.config.max_output_bytes,
        };

        let script = self.config.script_path.as_str();
        let result = match self.config.runtime {
            ScorerRuntime::Python => self.python_executor.execute(script, input).await,
            ScorerRuntime::Shell => self.shell_executor.execute(script, input).await,
        };

        classify(result)
    }
}

fn classify(result: Result<ScriptOutput, ScriptError>) -> Result<Value, RecommendError> {
    let output = match result {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!(error = %e, "Scorer run failed");
            return Err(RecommendError::ScorerExecution {
                reason: e.to_string(),
            });
        }
    };

    tracing::debug!(
        exit_code = output.exit_code,
        duration_ms = output.duration_ms,
        stdout = %output.stdout,
        stderr = %output.stderr,
        "Scorer finished"
    );

    if !output.succeeded() {
        tracing::warn!(
            exit_code = output.exit_code,
            stderr = %output.stderr,
            "Scorer exited with non-zero status"
        );
        return Err(RecommendError::ScorerExecution {
            reason: format!("exit code {}", output.exit_code),
        });
    }

    match output.parsed_output {
        Some(value) => Ok(value),
        None => {
            tracing::error!(stdout = %output.stdout, "Scorer output is not valid JSON");
            Err(RecommendError::ScorerOutput {
                details: output.stdout,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::recommendation::RecommendationRequest;
    use crate::scripting::test_helpers::write_temp_script;

    fn shell_scorer(script: &tempfile::NamedTempFile) -> Scorer {
        Scorer::new(ScorerConfig {
            runtime: ScorerRuntime::Shell,
            script_path: script.path().to_str().expect("path").to_string(),
            timeout: Duration::from_secs(5),
            ..ScorerConfig::default()
        })
    }

    fn resolved() -> ResolvedRequest {
        RecommendationRequest {
            age: Some(json!(30)),
            description: Some(json!("My eyes feel dry.")),
            ..RecommendationRequest::default()
        }
        .resolve()
        .expect("valid request")
    }

    #[test]
    fn runtime_parses_case_insensitively() {
        assert_eq!("python".parse::<ScorerRuntime>(), Ok(ScorerRuntime::Python));
        assert_eq!("Shell".parse::<ScorerRuntime>(), Ok(ScorerRuntime::Shell));
        assert!("ruby".parse::<ScorerRuntime>().is_err());
        assert_eq!(ScorerRuntime::Shell.as_str(), "shell");
    }

    #[test]
    fn default_config_matches_scorer_contract() {
        let config = ScorerConfig::default();
        assert_eq!(config.runtime, ScorerRuntime::Python);
        assert_eq!(config.script_path, "check.py");
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.max_output_bytes, 1_048_576);
    }

    #[tokio::test]
    async fn json_output_is_returned_verbatim() {
        let script =
            write_temp_script(r#"echo '{"recommendations": [["u", 1, "t", "m"]], "extra": true}'"#);
        let value = shell_scorer(&script)
            .recommend(&resolved())
            .await
            .expect("scorer succeeds");
        assert_eq!(
            value,
            json!({"recommendations": [["u", 1, "t", "m"]], "extra": true})
        );
    }

    #[tokio::test]
    async fn scorer_receives_named_arguments() {
        let script = write_temp_script(
            r#"printf '{"%s":"%s","%s":"%s","%s":"%s","%s":"%s","%s":"%s"}' "$1" "$2" "$3" "$4" "$5" "$6" "$7" "$8" "$9" "${10}""#,
        );
        let value = shell_scorer(&script)
            .recommend(&resolved())
            .await
            .expect("scorer succeeds");
        assert_eq!(
            value,
            json!({
                "--age": "30",
                "--brand": "Vega",
                "--market_status": "False",
                "--description": "My eyes feel dry.",
                "--allergies": ""
            })
        );
    }

    #[tokio::test]
    async fn nonzero_exit_is_execution_error_even_with_json() {
        let script = write_temp_script("echo '{\"recommendations\": []}'\nexit 1\n");
        let result = shell_scorer(&script).recommend(&resolved()).await;
        assert_matches!(result, Err(RecommendError::ScorerExecution { .. }));
    }

    #[tokio::test]
    async fn timeout_is_execution_error() {
        let script = write_temp_script("sleep 30\n");
        let scorer = Scorer::new(ScorerConfig {
            runtime: ScorerRuntime::Shell,
            script_path: script.path().to_str().expect("path").to_string(),
            timeout: Duration::from_millis(200),
            ..ScorerConfig::default()
        });
        let result = scorer.recommend(&resolved()).await;
        assert_matches!(result, Err(RecommendError::ScorerExecution { .. }));
    }

    #[tokio::test]
    async fn non_json_output_is_output_error_with_details() {
        let script = write_temp_script("echo 'Cannot analyse your status: Please be more specific!'\n");
        let result = shell_scorer(&script).recommend(&resolved()).await;
        assert_matches!(
            result,
            Err(RecommendError::ScorerOutput { details })
                if details.contains("Cannot analyse your status")
        );
    }

    #[tokio::test]
    async fn script_availability_follows_working_directory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("check.py"), "print('{}')\n").expect("write script");

        let in_dir = Scorer::new(ScorerConfig {
            working_directory: Some(dir.path().to_str().expect("path").to_string()),
            ..ScorerConfig::default()
        });
        assert!(in_dir.script_available().await);

        let elsewhere = Scorer::new(ScorerConfig {
            working_directory: Some("/nonexistent".to_string()),
            ..ScorerConfig::default()
        });
        assert!(!elsewhere.script_available().await);
    }

    #[tokio::test]
    async fn missing_script_is_execution_error() {
        let scorer = Scorer::new(ScorerConfig {
            script_path: "/nonexistent/check.py".to_string(),
            ..ScorerConfig::default()
        });
        let result = scorer.recommend(&resolved()).await;
        assert_matches!(result, Err(RecommendError::ScorerExecution { .. }));
    }
}
