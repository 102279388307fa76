//! Unix timestamp tool definition.

use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::{ToolDescriptor, ToolError, parse_params};

/// The tool takes no parameters; the empty struct still rejects extras.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UnixTimestampParams {}

/// Unix timestamp tool - seconds since January 1, 1970 UTC.
pub struct UnixTimestampTool;

impl UnixTimestampTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_unix_timestamp";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get the current Unix timestamp as seconds since January 1, 1970 UTC (Epoch time).";

    /// Execute the tool logic.
    pub async fn execute(_params: UnixTimestampParams) -> Result<serde_json::Value, ToolError> {
        Ok(serde_json::json!(Utc::now().timestamp()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UnixTimestampParams>(),
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
                    let params: UnixTimestampParams = parse_params(args)?;
                    Self::execute(params).await
                }
                .boxed()
            }),
        )
    }
}
