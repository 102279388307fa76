//! Tool dispatcher - routes a call to the correct handler.
//!
//! The dispatcher holds only the immutable registry and enablement policy
//! established at startup; each call is independent and stateless, so
//! concurrent calls need no locking. Every failure is reported back in the
//! uniform `ToolOutput` envelope; nothing here terminates the process.

use std::sync::Arc;

use rmcp::model::Tool;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::enablement::EnablementPolicy;
use super::error::ToolError;
use super::registry::ToolRegistry;

/// The transport-agnostic response envelope for a tool call.
///
/// Either `ok` with a `value`, or not-`ok` with an `error` message.
/// Never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Whether the call succeeded.
    pub ok: bool,

    /// The result value on success. Omitted from failure envelopes, so
    /// deserialization fills it back in as null.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,

    /// Error message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolOutput {
    /// Create a successful output.
    pub fn success(value: Value) -> Self {
        Self {
            ok: true,
            value,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            value: Value::Null,
            error: Some(error.into()),
        }
    }
}

/// Dispatcher - checks enablement, validates arguments, invokes the handler,
/// and normalizes the outcome.
///
/// No retry and no timeout are imposed here; any timeout is the
/// responsibility of the individual handler or the transport layer.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    policy: EnablementPolicy,
}

impl Dispatcher {
    /// Create a dispatcher over a registry and a startup-computed policy.
    pub fn new(registry: Arc<ToolRegistry>, policy: EnablementPolicy) -> Self {
        Self { registry, policy }
    }

    /// Tool metadata for every tool that passes the enablement policy, in
    /// registration order. Used for discovery/listing on both transports.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.registry
            .list()
            .iter()
            .filter(|d| self.policy.allows(d.name()))
            .map(|d| d.tool().clone())
            .collect()
    }

    /// Call a tool by name, normalizing the outcome to the envelope.
    pub async fn call(&self, name: &str, arguments: Value) -> ToolOutput {
        match self.dispatch(name, arguments).await {
            Ok(value) => ToolOutput::success(value),
            Err(e) => {
                warn!("Tool call '{}' failed: {}", name, e);
                ToolOutput::failure(e.to_string())
            }
        }
    }

    /// Call a tool by name, surfacing the error taxonomy to the caller.
    pub async fn dispatch(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let descriptor = self.registry.get(name)?;

        if !self.policy.allows(name) {
            return Err(ToolError::disabled(name));
        }

        let args = match arguments {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => {
                return Err(ToolError::invalid_arguments(format!(
                    "arguments must be a JSON object, got {}",
                    json_type_name(&other)
                )));
            }
        };

        debug!("Dispatching tool call: {}", name);
        descriptor.invoke(args).await
    }
}

/// Deserialize a tool's argument object into its typed parameter struct.
///
/// Parameter structs use `deny_unknown_fields`, so missing required fields,
/// uncoercible types, and unknown extras all surface here as
/// `InvalidArguments` - the handler never observes partially-valid input.
pub fn parse_params<T: DeserializeOwned>(
    arguments: serde_json::Map<String, Value>,
) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::registry::{ToolDescriptor, ToolRegistry};
    use futures::FutureExt;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn tool_model(name: &str) -> Tool {
        Tool {
            name: name.to_string().into(),
            description: Some("test tool".into()),
            input_schema: Arc::new(serde_json::Map::new()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    #[derive(Debug, serde::Deserialize)]
    #[serde(deny_unknown_fields)]
    struct EchoParams {
        message: String,
    }

    /// Registry with one "echo" tool that counts handler invocations.
    fn echo_registry(invocations: Arc<AtomicUsize>) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry
            .register(ToolDescriptor::new(
                tool_model("echo"),
                Arc::new(move |args| {
                    let invocations = invocations.clone();
                    async move {
                        let params: EchoParams = parse_params(args)?;
                        invocations.fetch_add(1, Ordering::SeqCst);
                        Ok(json!(params.message))
                    }
                    .boxed()
                }),
            ))
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = Arc::new(echo_registry(Arc::new(AtomicUsize::new(0))));
        let dispatcher = Dispatcher::new(registry, EnablementPolicy::allow_all());

        let err = dispatcher.dispatch("nonexistent", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::Unknown(_)));
    }

    #[tokio::test]
    async fn test_disabled_distinct_from_unknown() {
        let registry = Arc::new(echo_registry(Arc::new(AtomicUsize::new(0))));
        let policy = EnablementPolicy::from_lists(None, Some("echo"));
        let dispatcher = Dispatcher::new(registry, policy);

        let err = dispatcher
            .dispatch("echo", json!({"message": "hi"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Disabled(_)));

        let err = dispatcher.dispatch("nonexistent", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::Unknown(_)));
    }

    #[tokio::test]
    async fn test_missing_required_argument_never_reaches_handler() {
        let invocations = Arc::new(AtomicUsize::new(0));
        let registry = Arc::new(echo_registry(invocations.clone()));
        let dispatcher = Dispatcher::new(registry, EnablementPolicy::allow_all());

        let err = dispatcher.dispatch("echo", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert_eq!(invocations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_extra_argument_rejected() {
        let invocations = Arc::new(AtomicUsize::new(0));
        let registry = Arc::new(echo_registry(invocations.clone()));
        let dispatcher = Dispatcher::new(registry, EnablementPolicy::allow_all());

        let err = dispatcher
            .dispatch("echo", json!({"message": "hi", "extra": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert_eq!(invocations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_object_arguments_rejected() {
        let registry = Arc::new(echo_registry(Arc::new(AtomicUsize::new(0))));
        let dispatcher = Dispatcher::new(registry, EnablementPolicy::allow_all());

        let err = dispatcher.dispatch("echo", json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_successful_call_envelope() {
        let registry = Arc::new(echo_registry(Arc::new(AtomicUsize::new(0))));
        let dispatcher = Dispatcher::new(registry, EnablementPolicy::allow_all());

        let output = dispatcher.call("echo", json!({"message": "hi"})).await;
        assert!(output.ok);
        assert_eq!(output.value, json!("hi"));
        assert!(output.error.is_none());
    }

    #[tokio::test]
    async fn test_failure_envelope() {
        let registry = Arc::new(echo_registry(Arc::new(AtomicUsize::new(0))));
        let dispatcher = Dispatcher::new(registry, EnablementPolicy::allow_all());

        let output = dispatcher.call("nonexistent", json!({})).await;
        assert!(!output.ok);
        assert!(output.value.is_null());
        assert!(output.error.unwrap().contains("Unknown tool"));
    }

    #[test]
    fn test_envelope_round_trip() {
        let failure = ToolOutput::failure("boom");
        let json = serde_json::to_string(&failure).unwrap();
        // The null value is omitted on the wire
        assert!(!json.contains("value"));

        let parsed: ToolOutput = serde_json::from_str(&json).unwrap();
        assert!(!parsed.ok);
        assert!(parsed.value.is_null());
        assert_eq!(parsed.error.as_deref(), Some("boom"));

        let success = ToolOutput::success(json!(42));
        let json = serde_json::to_string(&success).unwrap();
        let parsed: ToolOutput = serde_json::from_str(&json).unwrap();
        assert!(parsed.ok);
        assert_eq!(parsed.value, json!(42));
    }

    #[tokio::test]
    async fn test_list_tools_respects_policy() {
        let registry = Arc::new(echo_registry(Arc::new(AtomicUsize::new(0))));
        let policy = EnablementPolicy::from_lists(None, Some("echo"));
        let dispatcher = Dispatcher::new(registry, policy);
        assert!(dispatcher.list_tools().is_empty());
    }
}
