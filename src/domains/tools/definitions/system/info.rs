//! System information tool definition.
//!
//! Static host facts: OS identity, hostname, architecture, CPU and memory
//! totals.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use sysinfo::System;

use crate::domains::tools::{ToolDescriptor, ToolError, parse_params};

/// The tool takes no parameters.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SystemInfoParams {}

/// System information tool.
pub struct SystemInfoTool;

impl SystemInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_system_info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get system information, including system, node name, release, version, machine, processor, CPU count, memory total and swap total.";

    /// Execute the tool logic.
    pub async fn execute(_params: SystemInfoParams) -> Result<serde_json::Value, ToolError> {
        let sys = System::new_all();

        Ok(serde_json::json!({
            "system": System::name(),
            "node_name": System::host_name(),
            "release": System::kernel_version(),
            "version": System::os_version(),
            "machine": System::cpu_arch(),
            "processor": sys.cpus().first().map(|c| c.brand().trim().to_string()),
            "cpu_count": sys.cpus().len(),
            "memory_total": sys.total_memory(),
            "swap_total": sys.total_swap(),
        }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SystemInfoParams>(),
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
                    let params: SystemInfoParams = parse_params(args)?;
                    Self::execute(params).await
                }
                .boxed()
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_system_info_shape() {
        let value = SystemInfoTool::execute(SystemInfoParams {}).await.unwrap();

        assert!(value["cpu_count"].as_u64().unwrap() >= 1);
        assert!(value["memory_total"].as_u64().unwrap() > 0);
        // Every documented key is present, even when a probe returns null
        for key in [
            "system",
            "node_name",
            "release",
            "version",
            "machine",
            "processor",
            "cpu_count",
            "memory_total",
            "swap_total",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }
}
