//! Ping tool definition.
//!
//! Spawns the platform ping binary against a host and returns its output.
//! Windows spells the count and timeout flags differently and takes the
//! timeout in milliseconds.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use super::run_probe;
use crate::domains::tools::{ToolDescriptor, ToolError, parse_params};

/// Parameters for the ping tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PingParams {
    /// DNS name or IP address to ping, required.
    pub destination: String,

    /// Timeout for the ping in seconds, optional, defaults to 15 seconds,
    /// max 120.
    #[serde(default = "default_timeout")]
    pub timeout: f64,

    /// Number of pings to send, optional, defaults to 3, max 100.
    #[serde(default = "default_count")]
    pub count: i64,
}

fn default_timeout() -> f64 {
    15.0
}

fn default_count() -> i64 {
    3
}

/// Ping tool.
pub struct PingTool;

impl PingTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "ping";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Pings a DNS name or IP address with the optional timeout and count. Returns details of the ping command.";

    /// Execute the tool logic.
    pub async fn execute(params: PingParams) -> Result<serde_json::Value, ToolError> {
        let destination = params.destination.trim();
        if destination.is_empty() {
            return Err(ToolError::invalid_arguments(
                "Destination must be a non-empty DNS name or IP address",
            ));
        }
        if !params.timeout.is_finite() || params.timeout <= 0.0 || params.timeout > 120.0 {
            return Err(ToolError::invalid_arguments(
                "Timeout must be a positive number between 0 and 120 seconds",
            ));
        }
        if !(1..=100).contains(&params.count) {
            return Err(ToolError::invalid_arguments(
                "Count must be a positive integer between 1 and 100",
            ));
        }

        let args = build_args(destination, params.timeout, params.count);
        debug!("Pinging {destination}: ping {}", args.join(" "));

        let output = run_probe("ping", &args, params.timeout).await?;

        if output.exit_code != Some(0) {
            let detail = if output.stderr.is_empty() {
                "No error message".to_string()
            } else {
                output.stderr
            };
            return Err(ToolError::execution_failed(format!(
                "Error pinging {destination} (code {:?}):\n{detail}",
                output.exit_code
            )));
        }
        if output.stdout.is_empty() {
            return Err(ToolError::execution_failed(format!(
                "No result from ping command for {destination}"
            )));
        }

        Ok(serde_json::Value::String(output.stdout))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<PingParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create the registry descriptor for this tool.
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::to_tool(),
            Arc::new(|args| {
                async move {
                    let params: PingParams = parse_params(args)?;
                    Self::execute(params).await
                }
                .boxed()
            }),
        )
    }
}

#[cfg(windows)]
fn build_args(destination: &str, timeout: f64, count: i64) -> Vec<String> {
    // Windows takes the deadline in milliseconds
    vec![
        "-n".to_string(),
        count.to_string(),
        "-w".to_string(),
        ((timeout * 1000.0) as i64).to_string(),
        destination.to_string(),
    ]
}

#[cfg(not(windows))]
fn build_args(destination: &str, timeout: f64, count: i64) -> Vec<String> {
    vec![
        "-c".to_string(),
        count.to_string(),
        "-w".to_string(),
        (timeout as i64).to_string(),
        destination.to_string(),
    ]
}
