//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability. It is built once at startup
/// and treated as immutable for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Tool enablement configuration.
    pub tools: ToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for tool enablement.
///
/// Both fields are raw comma-separated tool-name lists as supplied by the
/// operator. They are parsed into an `EnablementPolicy` once at startup;
/// names that do not match any registered tool are ignored silently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Comma-separated allow list. Empty or unset means every registered
    /// tool is a candidate.
    pub enabled: Option<String>,

    /// Comma-separated deny list. Always removes from the candidate set,
    /// even if a name also appears in the allow list.
    pub disabled: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "utilities-box".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            tools: ToolsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_ENABLED_TOOLS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(raw) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = raw.to_lowercase() != "false" && raw != "0";
        }

        if let Ok(enabled) = std::env::var("MCP_ENABLED_TOOLS") {
            info!("Tool allow list configured: {}", enabled);
            config.tools.enabled = Some(enabled);
        }

        if let Ok(disabled) = std::env::var("MCP_DISABLED_TOOLS") {
            info!("Tool deny list configured: {}", disabled);
            config.tools.disabled = Some(disabled);
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }
}
