//! Tool Router - builds the rmcp ToolRouter from the dispatcher.
//!
//! The router is what the STDIO transport serves. It is built dynamically
//! from the registry so both transports share one dispatch path, and only
//! tools that pass the enablement policy are routed at all.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::{CallToolResult, Content},
};

use super::dispatcher::Dispatcher;
use super::error::ToolError;

/// Build the tool router with every enabled tool.
pub fn build_tool_router<S>(dispatcher: Arc<Dispatcher>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let mut router = ToolRouter::new();

    for tool in dispatcher.list_tools() {
        let name = tool.name.to_string();
        let dispatcher = dispatcher.clone();

        router = router.with_route(ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let dispatcher = dispatcher.clone();
            let name = name.clone();
            async move {
                match dispatcher.dispatch(&name, serde_json::Value::Object(args)).await {
                    Ok(value) => Ok(CallToolResult::success(vec![Content::text(
                        render_value(&value),
                    )])),
                    Err(ToolError::InvalidArguments(msg)) => {
                        Err(McpError::invalid_params(msg, None))
                    }
                    Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
                }
            }
            .boxed()
        }));
    }

    router
}

/// Render a result value as text content. Bare strings are passed through
/// without JSON quoting; everything else is pretty-printed JSON.
fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::enablement::EnablementPolicy;
    use crate::domains::tools::registry::ToolRegistry;

    struct TestServer {}

    fn dispatcher(policy: EnablementPolicy) -> Arc<Dispatcher> {
        Arc::new(Dispatcher::new(
            Arc::new(ToolRegistry::builtin().unwrap()),
            policy,
        ))
    }

    #[test]
    fn test_build_router_full_catalog() {
        let router: ToolRouter<TestServer> = build_tool_router(dispatcher(EnablementPolicy::allow_all()));
        let tools = router.list_all();
        assert_eq!(tools.len(), 12);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"get_current_time"));
        assert!(names.contains(&"generate_uuid"));
        assert!(names.contains(&"evaluate"));
        assert!(names.contains(&"sleep"));
    }

    #[test]
    fn test_router_excludes_disabled_tools() {
        let policy = EnablementPolicy::from_lists(None, Some("ping,check_connectivity"));
        let router: ToolRouter<TestServer> = build_tool_router(dispatcher(policy));
        let names: Vec<_> = router.list_all().iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names.len(), 10);
        assert!(!names.contains(&"ping".to_string()));
        assert!(!names.contains(&"check_connectivity".to_string()));
    }

    #[test]
    fn test_router_matches_registry_order_and_names() {
        let registry = ToolRegistry::builtin().unwrap();
        let registry_names: Vec<_> = registry.names().iter().map(|n| n.to_string()).collect();

        let router: ToolRouter<TestServer> =
            build_tool_router(dispatcher(EnablementPolicy::allow_all()));
        let router_names: Vec<_> = router.list_all().iter().map(|t| t.name.to_string()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&serde_json::json!("plain")), "plain");
        assert_eq!(render_value(&serde_json::json!(42)), "42");
    }
}
