//! System stats tool definition.
//!
//! Point-in-time load figures: boot time, CPU usage, memory and swap usage.
//! CPU usage is sampled across sysinfo's minimum update interval, mirroring
//! an interval-based CPU percent probe.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use sysinfo::{CpuRefreshKind, MINIMUM_CPU_UPDATE_INTERVAL, MemoryRefreshKind, RefreshKind, System};

use crate::domains::tools::{ToolDescriptor, ToolError, parse_params};

/// The tool takes no parameters.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SystemStatsParams {}

/// System stats tool.
pub struct SystemStatsTool;

impl SystemStatsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_system_stats";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get system stats, including boot time, CPU count, CPU percent, memory percent, memory total, memory used, memory free, swap percent, swap total, swap used and swap free.";

    /// Execute the tool logic.
    pub async fn execute(_params: SystemStatsParams) -> Result<serde_json::Value, ToolError> {
        let mut sys = System::new_with_specifics(
            RefreshKind::new()
                .with_cpu(CpuRefreshKind::everything())
                .with_memory(MemoryRefreshKind::everything()),
        );

        // Two samples are needed for a meaningful CPU usage figure
        tokio::time::sleep(MINIMUM_CPU_UPDATE_INTERVAL).await;
        sys.refresh_cpu_usage();

        let memory_total = sys.total_memory();
        let memory_used = sys.used_memory();
        let swap_total = sys.total_swap();
        let swap_used = sys.used_swap();

        Ok(serde_json::json!({
            "boot_time": System::boot_time(),
            "cpu_count": sys.cpus().len(),
            "cpu_percent": sys.global_cpu_info().cpu_usage(),
            "memory_percent": percent(memory_used, memory_total),
            "memory_total": memory_total,
            "memory_used": memory_used,
            "memory_free": sys.free_memory(),
            "swap_percent": percent(swap_used, swap_total),
            "swap_total": swap_total,
            "swap_used": swap_used,
            "swap_free": sys.free_swap(),
        }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SystemStatsParams>(),
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
                    let params: SystemStatsParams = parse_params(args)?;
                    Self::execute(params).await
                }
                .boxed()
            }),
        )
    }
}

fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    used as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_system_stats_ranges() {
        let value = SystemStatsTool::execute(SystemStatsParams {}).await.unwrap();

        assert!(value["boot_time"].as_u64().unwrap() > 0);
        assert!(value["cpu_count"].as_u64().unwrap() >= 1);

        let memory_percent = value["memory_percent"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&memory_percent));

        let cpu_percent = value["cpu_percent"].as_f64().unwrap();
        assert!(cpu_percent >= 0.0);
    }

    #[test]
    fn test_percent_zero_total() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(50, 200), 25.0);
    }
}
