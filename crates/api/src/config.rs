use std::time::Duration;

use vitalrec_core::scorer::{ScorerConfig, ScorerRuntime};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`). Must stay above the
    /// scorer timeout or slow scorer runs surface as 408 instead of 501.
    pub request_timeout_secs: u64,
    /// How the recommendation scorer is launched.
    pub scorer: ScorerConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3001`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `SCORER_RUNTIME`          | `python`                   |
    /// | `SCORER_INTERPRETER`      | `python`                   |
    /// | `SCORER_SCRIPT`           | `check.py`                 |
    /// | `SCORER_WORKING_DIR`      | (server working directory) |
    /// | `SCORER_TIMEOUT_SECS`     | `20`                       |
    /// | `SCORER_MAX_OUTPUT_BYTES` | `1048576`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let scorer = scorer_config_from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            scorer,
        }
    }
}

fn scorer_config_from_env() -> ScorerConfig {
    let defaults = ScorerConfig::default();

    let runtime: ScorerRuntime = std::env::var("SCORER_RUNTIME")
        .ok()
        .map(|v| v.parse().unwrap_or_else(|e| panic!("SCORER_RUNTIME: {e}")))
        .unwrap_or(defaults.runtime);

    let interpreter = std::env::var("SCORER_INTERPRETER").unwrap_or(defaults.interpreter);

    let script_path = std::env::var("SCORER_SCRIPT").unwrap_or(defaults.script_path);

    let working_directory = std::env::var("SCORER_WORKING_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty());

    let timeout = std::env::var("SCORER_TIMEOUT_SECS")
        .ok()
        .map(|v| {
            Duration::from_secs(
                v.parse()
                    .expect("SCORER_TIMEOUT_SECS must be a valid u64"),
            )
        })
        .unwrap_or(defaults.timeout);

    let max_output_bytes: usize = std::env::var("SCORER_MAX_OUTPUT_BYTES")
        .ok()
        .map(|v| {
            v.parse()
                .expect("SCORER_MAX_OUTPUT_BYTES must be a valid usize")
        })
        .unwrap_or(defaults.max_output_bytes);

    ScorerConfig {
        runtime,
        interpreter,
        script_path,
        working_directory,
        timeout,
        max_output_bytes,
    }
}
