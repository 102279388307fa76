//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to
//! perform specific actions or computations.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Append-only name-to-descriptor registry
//! - `enablement.rs` - Startup-computed allow/deny policy
//! - `dispatcher.rs` - Lookup, validation, invocation, envelope
//! - `router.rs` - Dynamic ToolRouter builder for the STDIO transport
//! - `error.rs` - Tool error taxonomy
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define a params struct, `execute()`, and `descriptor()`
//! 3. Export it in `definitions/mod.rs`
//! 4. Register it in `ToolRegistry::builtin()`
//!
//! The router and both transports pick it up automatically.

pub mod definitions;
mod dispatcher;
mod enablement;
mod error;
mod registry;
pub mod router;

pub use dispatcher::{Dispatcher, ToolOutput, parse_params};
pub use enablement::EnablementPolicy;
pub use error::ToolError;
pub use registry::{ToolDescriptor, ToolHandler, ToolRegistry};
pub use router::build_tool_router;
