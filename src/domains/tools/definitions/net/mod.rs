//! Network reachability tools.

mod connectivity;
mod ping;

pub use connectivity::ConnectivityTool;
pub use ping::PingTool;

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::domains::tools::ToolError;

/// Captured output of a finished probe subprocess.
pub(crate) struct ProbeOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Run a probe command with a hard deadline one second past the probe's own
/// timeout, so a wedged subprocess cannot hold the call open forever.
pub(crate) async fn run_probe(
    program: &str,
    args: &[String],
    timeout_secs: f64,
) -> Result<ProbeOutput, ToolError> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let deadline = Duration::from_secs_f64(timeout_secs + 1.0);
    let output = tokio::time::timeout(deadline, command.output())
        .await
        .map_err(|_| {
            ToolError::execution_failed(format!(
                "{program} command timed out after {timeout_secs} seconds"
            ))
        })?
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ToolError::execution_failed(format!("{program} command not found on this system"))
            } else {
                ToolError::execution_failed(format!("Failed to run {program}: {e}"))
            }
        })?;

    Ok(ProbeOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}
