//! Expression evaluation tool definition.
//!
//! Evaluates a numeric expression with optional named variables and returns
//! the result as a float.

use std::sync::Arc;

use evalexpr::{ContextWithMutableVariables, HashMapContext, Value as EvalValue};
use futures::FutureExt;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domains::tools::{ToolDescriptor, ToolError, parse_params};

/// Parameters for the expression evaluation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EvaluateParams {
    /// Numeric expression to evaluate, required.
    pub expression: String,

    /// Variables to use in the expression, if any, optional. Values may be
    /// numbers, booleans or strings.
    #[serde(default)]
    pub variables: Option<serde_json::Map<String, Value>>,
}

/// Expression evaluation tool.
pub struct EvaluateTool;

impl EvaluateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "evaluate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Evaluates the given numeric expression with the given variables (if any). Returns numerical value of the expression.";

    /// Execute the tool logic.
    pub async fn execute(params: EvaluateParams) -> Result<serde_json::Value, ToolError> {
        let expression = params.expression.trim();
        if expression.is_empty() {
            return Err(ToolError::invalid_arguments(
                "Expression must be a non-empty string",
            ));
        }

        let mut context = HashMapContext::new();
        if let Some(variables) = &params.variables {
            for (name, value) in variables {
                let converted = to_eval_value(value).ok_or_else(|| {
                    ToolError::invalid_arguments(format!(
                        "Variable '{name}' must be a number, boolean or string"
                    ))
                })?;
                context.set_value(name.clone(), converted).map_err(|e| {
                    ToolError::invalid_arguments(format!("Cannot bind variable '{name}': {e}"))
                })?;
            }
        }

        debug!("Evaluating expression '{expression}'");

        let result = evalexpr::eval_with_context(expression, &context).map_err(|e| {
            ToolError::execution_failed(format!("Error evaluating expression: {e}"))
        })?;

        let number = match result {
            EvalValue::Int(i) => i as f64,
            EvalValue::Float(f) => f,
            other => {
                return Err(ToolError::execution_failed(format!(
                    "Expression did not produce a numeric result: {other}"
                )));
            }
        };
        if !number.is_finite() {
            return Err(ToolError::execution_failed(
                "Expression produced a non-finite result",
            ));
        }

        Ok(serde_json::json!(number))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<EvaluateParams>(),
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
                    let params: EvaluateParams = parse_params(args)?;
                    Self::execute(params).await
                }
                .boxed()
            }),
        )
    }
}

fn to_eval_value(value: &Value) -> Option<EvalValue> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(EvalValue::Int(i))
            } else {
                n.as_f64().map(EvalValue::Float)
            }
        }
        Value::Bool(b) => Some(EvalValue::Boolean(*b)),
        Value::String(s) => Some(EvalValue::String(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn run(args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let params: EvaluateParams = serde_json::from_value(args).unwrap();
        EvaluateTool::execute(params).await
    }

    #[tokio::test]
    async fn test_simple_arithmetic() {
        let value = run(json!({"expression": "2 + 3 * 4"})).await.unwrap();
        assert_eq!(value.as_f64().unwrap(), 14.0);
    }

    #[tokio::test]
    async fn test_variables() {
        let value = run(json!({
            "expression": "a * b + 1",
            "variables": {"a": 2, "b": 3.5},
        }))
        .await
        .unwrap();
        assert_eq!(value.as_f64().unwrap(), 8.0);
    }

    #[tokio::test]
    async fn test_division_by_zero_fails() {
        let err = run(json!({"expression": "1 / 0"})).await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn test_malformed_expression_fails() {
        let err = run(json!({"expression": "2 +* 3"})).await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn test_empty_expression_rejected() {
        let err = run(json!({"expression": "   "})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_non_numeric_result_fails() {
        let err = run(json!({"expression": "1 < 2"})).await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn test_array_variable_rejected() {
        let err = run(json!({
            "expression": "a + 1",
            "variables": {"a": [1, 2]},
        }))
        .await
        .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
