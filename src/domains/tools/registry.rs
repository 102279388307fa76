//! Tool Registry - central registration point for all tools.
//!
//! This module provides:
//! - `ToolDescriptor`: immutable metadata + handler for one tool
//! - `ToolRegistry`: an append-only, name-indexed table of descriptors,
//!   built once at process start and read-only afterwards

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use rmcp::model::Tool;
use serde_json::{Map, Value};

use super::definitions;
use super::error::ToolError;

/// Boxed async handler: validated JSON arguments in, JSON value or domain
/// error out.
pub type ToolHandler =
    Arc<dyn Fn(Map<String, Value>) -> BoxFuture<'static, Result<Value, ToolError>> + Send + Sync>;

/// Static metadata for one tool: its name, parameter schema (as an rmcp
/// `Tool` model), and the handler invoked after validation.
///
/// Descriptors are immutable after registration.
#[derive(Clone)]
pub struct ToolDescriptor {
    tool: Tool,
    handler: ToolHandler,
}

impl ToolDescriptor {
    /// Create a descriptor from tool metadata and a handler.
    pub fn new(tool: Tool, handler: ToolHandler) -> Self {
        Self { tool, handler }
    }

    /// The unique tool name.
    pub fn name(&self) -> &str {
        self.tool.name.as_ref()
    }

    /// The tool metadata (name, description, input schema).
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Invoke the handler with an argument object.
    pub async fn invoke(&self, arguments: Map<String, Value>) -> Result<Value, ToolError> {
        (self.handler)(arguments).await
    }
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.tool.name)
            .finish_non_exhaustive()
    }
}

/// Tool registry - the mapping from name to descriptor.
///
/// Keys are unique, registration order is preserved for `list()`, and there
/// is no removal operation: the registry is append-only at startup.
#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the full built-in tool catalog registered in
    /// its canonical order.
    pub fn builtin() -> Result<Self, ToolError> {
        let mut registry = Self::new();

        // Time tools
        registry.register(definitions::CurrentTimeTool::descriptor())?;
        registry.register(definitions::UnixTimestampTool::descriptor())?;
        registry.register(definitions::TimeDiffTool::descriptor())?;

        // System tools
        registry.register(definitions::SystemInfoTool::descriptor())?;
        registry.register(definitions::SystemStatsTool::descriptor())?;

        // File system tools
        registry.register(definitions::ReadLinesTool::descriptor())?;
        registry.register(definitions::ReadFilesTool::descriptor())?;

        // Network tools
        registry.register(definitions::PingTool::descriptor())?;
        registry.register(definitions::ConnectivityTool::descriptor())?;

        // Other tools
        registry.register(definitions::EvaluateTool::descriptor())?;
        registry.register(definitions::GenerateUuidTool::descriptor())?;
        registry.register(definitions::SleepTool::descriptor())?;

        Ok(registry)
    }

    /// Register a descriptor. Fails if the name is already taken.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), ToolError> {
        let name = descriptor.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ToolError::DuplicateName(name));
        }
        self.index.insert(name, self.entries.len());
        self.entries.push(descriptor);
        Ok(())
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Result<&ToolDescriptor, ToolError> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| ToolError::unknown(name))
    }

    /// All descriptors in registration order.
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.entries
    }

    /// All registered tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|d| d.name()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    fn dummy_descriptor(name: &str) -> ToolDescriptor {
        let tool = Tool {
            name: name.to_string().into(),
            description: Some("test tool".into()),
            input_schema: Arc::new(Map::new()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        };
        ToolDescriptor::new(
            tool,
            Arc::new(|_args| async { Ok(Value::Null) }.boxed()),
        )
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(dummy_descriptor("a")).unwrap();
        assert!(registry.get("a").is_ok());
        assert!(matches!(
            registry.get("nonexistent"),
            Err(ToolError::Unknown(_))
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(dummy_descriptor("a")).unwrap();
        assert!(matches!(
            registry.register(dummy_descriptor("a")),
            Err(ToolError::DuplicateName(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(dummy_descriptor("c")).unwrap();
        registry.register(dummy_descriptor("a")).unwrap();
        registry.register(dummy_descriptor("b")).unwrap();
        assert_eq!(registry.names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_builtin_catalog() {
        let registry = ToolRegistry::builtin().unwrap();
        let names = registry.names();
        assert_eq!(names.len(), 12);
        assert!(names.contains(&"get_current_time"));
        assert!(names.contains(&"get_unix_timestamp"));
        assert!(names.contains(&"calc_time_diff"));
        assert!(names.contains(&"get_system_info"));
        assert!(names.contains(&"get_system_stats"));
        assert!(names.contains(&"read_lines"));
        assert!(names.contains(&"read_files"));
        assert!(names.contains(&"ping"));
        assert!(names.contains(&"check_connectivity"));
        assert!(names.contains(&"evaluate"));
        assert!(names.contains(&"generate_uuid"));
        assert!(names.contains(&"sleep"));
    }

    #[test]
    fn test_builtin_get_every_registered_name() {
        let registry = ToolRegistry::builtin().unwrap();
        for name in registry.names() {
            assert!(registry.get(name).is_ok(), "lookup failed for {name}");
        }
    }
}
