//! Time difference tool definition.
//!
//! Parses two timestamps with a shared strftime format and reports the
//! difference in a chosen unit.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime};
use futures::FutureExt;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;

use super::default_time_format;
use crate::domains::tools::definitions::units::{unit_factor, valid_units};
use crate::domains::tools::{ToolDescriptor, ToolError, parse_params};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the time difference tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TimeDiffParams {
    /// Start time in the specified format, required.
    pub start_time: String,

    /// End time in the specified format, required.
    pub end_time: String,

    /// Format of the times, optional. Defaults to %Y-%m-%d %H:%M:%S.
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Unit of time to return the difference in, optional, defaults to
    /// seconds. Can be microseconds, milliseconds, seconds, minutes, hours,
    /// days or weeks.
    #[serde(default = "default_diff_unit")]
    pub diff_unit: String,
}

fn default_diff_unit() -> String {
    "seconds".to_string()
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Time difference tool - `end_time - start_time` in the requested unit.
pub struct TimeDiffTool;

impl TimeDiffTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calc_time_diff";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Calculate the difference between two times in the specified format. The unit of the result can be microseconds, milliseconds, seconds, minutes, hours, days or weeks, defaults to seconds.";

    /// Execute the tool logic.
    pub async fn execute(params: TimeDiffParams) -> Result<serde_json::Value, ToolError> {
        let factor = unit_factor(&params.diff_unit).ok_or_else(|| {
            ToolError::execution_failed(format!(
                "Invalid unit: {}. Please use one of: {}",
                params.diff_unit,
                valid_units()
            ))
        })?;

        let start = parse_stamp(&params.start_time, &params.time_format)?;
        let end = parse_stamp(&params.end_time, &params.time_format)?;

        let delta = end.signed_duration_since(start);
        let seconds = delta
            .num_microseconds()
            .map(|us| us as f64 / 1_000_000.0)
            .unwrap_or_else(|| delta.num_milliseconds() as f64 / 1_000.0);

        Ok(serde_json::json!(seconds / factor))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<TimeDiffParams>(),
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
                    let params: TimeDiffParams = parse_params(args)?;
                    Self::execute(params).await
                }
                .boxed()
            }),
        )
    }
}

/// Parse a timestamp, accepting offset-aware formats first, then naive
/// date-times, then bare dates (taken at midnight).
fn parse_stamp(value: &str, format: &str) -> Result<NaiveDateTime, ToolError> {
    if let Ok(dt) = DateTime::parse_from_str(value, format) {
        return Ok(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
        return Ok(dt);
    }
    chrono::NaiveDate::parse_from_str(value, format)
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .map_err(|e| {
            ToolError::execution_failed(format!("Error parsing date/time '{value}': {e}"))
        })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn diff(args: serde_json::Value) -> Result<f64, ToolError> {
        let params: TimeDiffParams = serde_json::from_value(args).unwrap();
        TimeDiffTool::execute(params)
            .await
            .map(|v| v.as_f64().unwrap())
    }

    #[tokio::test]
    async fn test_diff_seconds_default() {
        let result = diff(json!({
            "start_time": "2024-01-01 00:00:00",
            "end_time": "2024-01-01 00:01:30",
        }))
        .await
        .unwrap();
        assert_eq!(result, 90.0);
    }

    #[tokio::test]
    async fn test_diff_in_hours_and_days() {
        let args = json!({
            "start_time": "2024-01-01 00:00:00",
            "end_time": "2024-01-02 12:00:00",
        });

        let mut hours = args.clone();
        hours["diff_unit"] = json!("hours");
        assert_eq!(diff(hours).await.unwrap(), 36.0);

        let mut days = args;
        days["diff_unit"] = json!("days");
        assert_eq!(diff(days).await.unwrap(), 1.5);
    }

    #[tokio::test]
    async fn test_negative_diff() {
        let result = diff(json!({
            "start_time": "2024-01-01 00:01:00",
            "end_time": "2024-01-01 00:00:00",
        }))
        .await
        .unwrap();
        assert_eq!(result, -60.0);
    }

    #[tokio::test]
    async fn test_invalid_unit() {
        let err = diff(json!({
            "start_time": "2024-01-01 00:00:00",
            "end_time": "2024-01-01 00:00:01",
            "diff_unit": "fortnights",
        }))
        .await
        .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn test_unparseable_timestamp() {
        let err = diff(json!({
            "start_time": "not a time",
            "end_time": "2024-01-01 00:00:00",
        }))
        .await
        .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn test_custom_format() {
        let result = diff(json!({
            "start_time": "01/01/2024",
            "end_time": "08/01/2024",
            "time_format": "%d/%m/%Y",
            "diff_unit": "weeks",
        }))
        .await
        .unwrap();
        assert_eq!(result, 1.0);
    }
}
