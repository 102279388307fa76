//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur during tool registration and dispatch.
///
/// Every variant except `DuplicateName` is reported to the caller inside the
/// call/response envelope; none of them terminate the process.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool name is not registered.
    #[error("Unknown tool: {0}")]
    Unknown(String),

    /// The tool is registered but excluded by the enablement policy.
    #[error("Tool is disabled: {0}")]
    Disabled(String),

    /// A tool with the same name was already registered.
    #[error("Duplicate tool name: {0}")]
    DuplicateName(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The tool handler failed with a domain error.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::Unknown(name.into())
    }

    /// Create a new "disabled tool" error.
    pub fn disabled(name: impl Into<String>) -> Self {
        Self::Disabled(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }
}
