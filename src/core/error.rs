//! Error types and handling for the MCP server.
//!
//! Startup is the only fallible phase outside a tool call: building the
//! registry can fail on a duplicate tool name. Everything that happens per
//! call is reported through the tool error taxonomy inside the response
//! envelope instead.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),
}
