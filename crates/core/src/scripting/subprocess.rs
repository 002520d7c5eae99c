//! Shared subprocess management.
//!
//! Provides [`run_command`], the spawn + capture + timeout logic used by
//! both executors. Each executor builds a [`tokio::process::Command`] for
//! its runtime and delegates the rest here.

use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::executor::{ScriptError, ScriptInput, ScriptOutput};

/// Spawn `cmd` as a child process, capture stdout/stderr, and enforce the
/// configured timeout and output cap.
///
/// The caller sets the program and leading arguments; `input.args` and the
/// working directory are applied here. stdin is closed immediately.
///
/// The timeout bounds the whole run: process exit plus EOF on both pipes.
/// A background job that inherits stdout cannot hold the call open past it.
pub async fn run_command(
    cmd: &mut Command,
    input: ScriptInput,
) -> Result<ScriptOutput, ScriptError> {
    cmd.args(&input.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(dir) = &input.working_directory {
        cmd.current_dir(dir);
    }

    let start = Instant::now();

    let mut child = cmd.spawn().map_err(ScriptError::IoError)?;

    // Read one byte past the cap so an overflow can be told apart from an
    // exact fit. Once a reader stops, its pipe closes and a child that keeps
    // writing gets EPIPE.
    let limit = input.max_output_bytes;
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();
    let mut stdout_task = tokio::spawn(async move { read_stream(stdout_handle, limit).await });
    let mut stderr_task = tokio::spawn(async move { read_stream(stderr_handle, limit).await });

    let run = async {
        let status = child.wait().await?;
        let stdout_bytes = (&mut stdout_task).await.unwrap_or_default();
        let stderr_bytes = (&mut stderr_task).await.unwrap_or_default();
        Ok::<_, std::io::Error>((status, stdout_bytes, stderr_bytes))
    };

    // On timeout `child` is dropped with `kill_on_drop(true)`, killing the
    // process if it is still running.
    let outcome = tokio::time::timeout(input.timeout, run).await;
    let (status, stdout_bytes, stderr_bytes) = match outcome {
        Ok(result) => result.map_err(ScriptError::IoError)?,
        Err(_elapsed) => {
            stdout_task.abort();
            stderr_task.abort();
            return Err(ScriptError::Timeout {
                elapsed_ms: elapsed_ms(start),
            });
        }
    };
    let duration_ms = elapsed_ms(start);

    if stdout_bytes.len() > limit {
        return Err(ScriptError::OutputLimitExceeded {
            stream: "stdout",
            limit,
        });
    }
    if stderr_bytes.len() > limit {
        return Err(ScriptError::OutputLimitExceeded {
            stream: "stderr",
            limit,
        });
    }

    let stdout = String::from_utf8_lossy(&stdout_bytes).into_owned();
    let stderr = String::from_utf8_lossy(&stderr_bytes).into_owned();
    let exit_code = status.code().unwrap_or(-1);
    let parsed_output = serde_json::from_str(stdout.trim()).ok();

    Ok(ScriptOutput {
        stdout,
        stderr,
        exit_code,
        duration_ms,
        parsed_output,
    })
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Read an output stream into a byte buffer, stopping at `limit + 1` bytes.
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>, limit: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(h) = handle {
        let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
        let _ = h.take(cap).read_to_end(&mut buf).await;
    }
    buf
}
