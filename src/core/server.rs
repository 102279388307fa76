//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool dispatcher.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (serde + schemars)
//! - `execute()` method (core logic)
//! - `descriptor()` method (registered in the ToolRegistry at startup)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs` from the
//! registry, filtered by the enablement policy. **Adding a new tool does NOT
//! require modifying this file!**

use rmcp::{
    ErrorData as McpError, ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;

use super::config::Config;
use crate::domains::tools::{
    Dispatcher, EnablementPolicy, ToolOutput, ToolRegistry, build_tool_router,
};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and owns the
/// dispatcher that routes tool calls. Registry and policy are built once
/// here and stay immutable for the process lifetime.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatcher shared by every transport.
    dispatcher: Arc<Dispatcher>,

    /// Tool router for handling tool calls over the rmcp protocol.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Builds the full tool registry and the startup-computed enablement
    /// policy. Fails only on a registry construction error (duplicate tool
    /// name), which indicates a programming mistake rather than bad input.
    pub fn new(config: Config) -> super::error::Result<Self> {
        let config = Arc::new(config);

        let registry = Arc::new(ToolRegistry::builtin()?);
        let policy = EnablementPolicy::from_lists(
            config.tools.enabled.as_deref(),
            config.tools.disabled.as_deref(),
        );
        let dispatcher = Arc::new(Dispatcher::new(registry, policy));

        Ok(Self {
            tool_router: build_tool_router::<Self>(dispatcher.clone()),
            config,
            dispatcher,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Number of tools that pass the enablement policy.
    pub fn active_tool_count(&self) -> usize {
        self.dispatcher.list_tools().len()
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.dispatcher
            .list_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Returns the uniform call envelope; failures are reported inside it,
    /// never as a transport-level error.
    pub async fn call_tool(&self, name: &str, arguments: serde_json::Value) -> ToolOutput {
        self.dispatcher.call(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Utilities box server. Provides time, system, file, network, math, UUID and sleep tools."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                icons: None,
                title: None,
                website_url: None,
            },
            ..Default::default()
        }
    }
}
