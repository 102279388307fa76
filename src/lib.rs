//! Utilities Box MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing a fixed
//! catalog of small utility operations: time computation, system stats, file
//! reads, network probes, math evaluation, UUID generation, and sleep.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   the main server handler, and the transport layer
//! - **domains::tools**: The tool catalog and the registry / enablement /
//!   dispatch machinery that ties a tool name to a handler
//!
//! # Example
//!
//! ```rust,no_run
//! use utilities_box_mcp_server::core::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
