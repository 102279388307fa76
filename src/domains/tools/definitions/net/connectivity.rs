//! Connectivity check tool definition.
//!
//! Issues a HEAD request with curl against a hostname, IP address or URL.
//! Only curl exit codes 7 (connection refused) and 28 (timeout) count as
//! unreachable; HTTP-level errors still prove the destination is reachable.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use super::run_probe;
use crate::domains::tools::{ToolDescriptor, ToolError, parse_params};

/// Parameters for the connectivity check tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConnectivityParams {
    /// Destination to check connectivity to, required, can be a hostname,
    /// IP address, or URL.
    pub destination: String,

    /// Timeout for the curl command in seconds, optional, defaults to 15
    /// seconds.
    #[serde(default = "default_timeout")]
    pub timeout: f64,

    /// Whether to apply proxy settings, optional, defaults to true. When
    /// false the destination host is excluded from any system proxy.
    #[serde(default = "default_proxy_enabled")]
    pub proxy_enabled: bool,

    /// Proxy server to use, optional, defaults to system proxy settings.
    #[serde(default)]
    pub proxy: Option<String>,

    /// Username for the proxy server, optional.
    #[serde(default)]
    pub proxy_username: Option<String>,

    /// Password for the proxy server, optional.
    #[serde(default)]
    pub proxy_password: Option<String>,
}

fn default_timeout() -> f64 {
    15.0
}

fn default_proxy_enabled() -> bool {
    true
}

/// Connectivity check tool.
pub struct ConnectivityTool;

impl ConnectivityTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "check_connectivity";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Checks connectivity to a hostname, IP address or URL using a curl HEAD request, with optional timeout and proxy settings. Returns a description of the connectivity status.";

    /// Execute the tool logic.
    pub async fn execute(params: ConnectivityParams) -> Result<serde_json::Value, ToolError> {
        let destination = params.destination.trim();
        if destination.is_empty() {
            return Err(ToolError::invalid_arguments(
                "Destination must be a non-empty DNS name or IP address",
            ));
        }
        if !params.timeout.is_finite() || params.timeout <= 0.0 {
            return Err(ToolError::invalid_arguments(
                "Timeout must be a positive number of seconds",
            ));
        }

        let args = build_args(destination, &params);
        debug!("Checking connectivity to {destination}: curl {}", args.join(" "));

        let output = run_probe("curl", &args, params.timeout).await?;

        if matches!(output.exit_code, Some(7) | Some(28)) {
            let detail = if output.stderr.is_empty() {
                "No error message".to_string()
            } else {
                output.stderr
            };
            return Err(ToolError::execution_failed(format!(
                "Error checking connectivity to {destination} (code {:?}):\n{detail}",
                output.exit_code
            )));
        }

        let result = if output.stdout.is_empty() {
            "No result from curl command".to_string()
        } else {
            output.stdout
        };
        let mut message = format!("Connectivity to {destination} is successful:\n{result}");
        if !output.stderr.is_empty() {
            message.push('\n');
            message.push_str(&output.stderr);
        }

        Ok(serde_json::Value::String(message))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ConnectivityParams>(),
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
                    let params: ConnectivityParams = parse_params(args)?;
                    Self::execute(params).await
                }
                .boxed()
            }),
        )
    }
}

fn build_args(destination: &str, params: &ConnectivityParams) -> Vec<String> {
    let mut args = vec![
        "--head".to_string(),
        "--connect-timeout".to_string(),
        params.timeout.to_string(),
    ];

    if params.proxy_enabled {
        if let Some(proxy) = params.proxy.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            args.push("--proxy".to_string());
            args.push(proxy.to_string());
        }
        if let Some(user) = params
            .proxy_username
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let credentials = match params
                .proxy_password
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
            {
                Some(password) => format!("{user}:{password}"),
                None => user.to_string(),
            };
            args.push("--proxy-user".to_string());
            args.push(credentials);
        }
    } else {
        args.push("--noproxy".to_string());
        args.push(extract_host(destination));
    }

    args.push("--insecure".to_string());
    args.push("--proxy-insecure".to_string());
    args.push(destination.to_string());
    args
}

/// Strip the scheme, path and port off a destination so it can name a proxy
/// exclusion.
fn extract_host(destination: &str) -> String {
    let without_scheme = match destination.find("://") {
        Some(pos) => &destination[pos + 3..],
        None => destination,
    };
    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(without_scheme);
    match authority.split_once(':') {
        Some((host, _port)) => host.to_string(),
        None => authority.to_string(),
    }
}
