//! Sleep tool definition.
//!
//! Suspends the current call for a duration given in any supported time
//! unit. Only the calling task sleeps; other calls keep being served.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use crate::domains::tools::definitions::units::{unit_factor, valid_units};
use crate::domains::tools::{ToolDescriptor, ToolError, parse_params};

/// Parameters for the sleep tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SleepParams {
    /// Time value to sleep for, in 'time_unit' units, required.
    pub time_value: f64,

    /// Time unit to sleep for, optional, defaults to seconds. Can be
    /// microseconds, milliseconds, seconds, minutes, hours, days or weeks.
    #[serde(default = "default_time_unit")]
    pub time_unit: String,
}

fn default_time_unit() -> String {
    "seconds".to_string()
}

/// Sleep tool.
pub struct SleepTool;

impl SleepTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "sleep";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Sleeps for a specified amount of time. Time unit can be microseconds, milliseconds, seconds, minutes, hours, days or weeks, defaults to seconds.";

    /// Execute the tool logic.
    pub async fn execute(params: SleepParams) -> Result<serde_json::Value, ToolError> {
        if !params.time_value.is_finite() || params.time_value <= 0.0 {
            return Err(ToolError::execution_failed(
                "Sleep duration must be a positive number",
            ));
        }
        let factor = unit_factor(&params.time_unit).ok_or_else(|| {
            ToolError::execution_failed(format!(
                "Invalid time unit. Please use one of: {}",
                valid_units()
            ))
        })?;

        let seconds = params.time_value * factor;
        let duration = Duration::try_from_secs_f64(seconds).map_err(|_| {
            ToolError::execution_failed("Sleep duration is out of range")
        })?;

        let start = Instant::now();
        tokio::time::sleep(duration).await;
        debug!("Actual sleep time: {:.6} seconds", start.elapsed().as_secs_f64());

        Ok(serde_json::Value::String(format!(
            "Server slept for {} {}.",
            params.time_value, params.time_unit
        )))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SleepParams>(),
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
                    let params: SleepParams = parse_params(args)?;
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
    use serde_json::json;

    async fn run(args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let params: SleepParams = serde_json::from_value(args).unwrap();
        SleepTool::execute(params).await
    }

    #[tokio::test]
    async fn test_sleep_milliseconds() {
        let start = Instant::now();
        let value = run(json!({"time_value": 20, "time_unit": "milliseconds"}))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(value.as_str().unwrap(), "Server slept for 20 milliseconds.");
    }

    #[tokio::test]
    async fn test_default_unit_is_seconds() {
        let value = run(json!({"time_value": 0.01})).await.unwrap();
        assert_eq!(value.as_str().unwrap(), "Server slept for 0.01 seconds.");
    }

    #[tokio::test]
    async fn test_non_positive_duration_fails() {
        let err = run(json!({"time_value": 0})).await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));

        let err = run(json!({"time_value": -1.5})).await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn test_invalid_unit_fails() {
        let err = run(json!({"time_value": 1, "time_unit": "fortnights"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }
}
