//! Current time tool definition.
//!
//! Returns the current time in a caller-supplied strftime format, either in
//! the local timezone or a named IANA timezone.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Local, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use futures::FutureExt;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::default_time_format;
use crate::domains::tools::{ToolDescriptor, ToolError, parse_params};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the current time tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CurrentTimeParams {
    /// Timezone name to use (e.g., 'Asia/Shanghai', 'America/San_Francisco'),
    /// optional. Defaults to the local timezone.
    #[serde(default)]
    pub timezone_name: Option<String>,

    /// Format of the current time, optional. Defaults to %Y-%m-%d %H:%M:%S.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

/// Result payload: the formatted time plus timezone name and offset when
/// available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentTimeResult {
    /// Current time in the requested format.
    pub datetime: String,

    /// Timezone name, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tz_name: Option<String>,

    /// Timezone offset from UTC in seconds, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tz_offset: Option<i32>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Current time tool - formats the current time with timezone awareness.
pub struct CurrentTimeTool;

impl CurrentTimeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_current_time";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the current time with the specified timezone name (optional) and format (optional), defaults to the local timezone and %Y-%m-%d %H:%M:%S. Returns the current time in the specified format with timezone name and offset if available.";

    /// Execute the tool logic.
    pub async fn execute(params: CurrentTimeParams) -> Result<serde_json::Value, ToolError> {
        let timezone_name = params
            .timezone_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let result = match timezone_name {
            Some(name) => {
                let tz: Tz = name.parse().map_err(|_| {
                    ToolError::execution_failed(format!("Unknown timezone name: '{name}'"))
                })?;
                let now = Utc::now().with_timezone(&tz);
                debug!("Formatting current time in timezone {}", name);
                CurrentTimeResult {
                    datetime: format_datetime(&now, &params.time_format)?,
                    tz_name: Some(name.to_string()),
                    tz_offset: Some(now.offset().fix().local_minus_utc()),
                }
            }
            None => {
                let now = Local::now();
                CurrentTimeResult {
                    datetime: format_datetime(&now, &params.time_format)?,
                    tz_name: iana_time_zone::get_timezone().ok(),
                    tz_offset: Some(now.offset().fix().local_minus_utc()),
                }
            }
        };

        serde_json::to_value(result).map_err(|e| ToolError::execution_failed(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CurrentTimeParams>(),
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
                    let params: CurrentTimeParams = parse_params(args)?;
                    Self::execute(params).await
                }
                .boxed()
            }),
        )
    }
}

/// Format a datetime with a caller-supplied strftime string.
///
/// chrono surfaces invalid format specifiers as a fmt error when the
/// `DelayedFormat` is written, so the write target catches them here.
fn format_datetime<T: TimeZone>(dt: &DateTime<T>, format: &str) -> Result<String, ToolError>
where
    T::Offset: std::fmt::Display,
{
    let mut out = String::new();
    write!(out, "{}", dt.format(format))
        .map_err(|_| ToolError::execution_failed(format!("Invalid time format: '{format}'")))?;
    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================
