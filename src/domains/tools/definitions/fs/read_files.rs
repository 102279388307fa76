//! Read files tool definition.
//!
//! Reads the full content of a batch of UTF-8 text files. Unreadable files
//! are skipped by default; with `skip_errors` disabled the first failure
//! aborts the whole call.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{MAX_FILE_BYTES, display_path, resolve_path};
use crate::domains::tools::{ToolDescriptor, ToolError, parse_params};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the read files tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ReadFilesParams {
    /// File paths to read, absolute or relative, required.
    pub file_paths: Vec<String>,

    /// Whether to skip files that cannot be read, optional, defaults to true.
    /// When false, the first unreadable file fails the whole call.
    #[serde(default = "default_skip_errors")]
    pub skip_errors: bool,

    /// Working directory to use for relative file paths, optional, defaults
    /// to the current working directory.
    #[serde(default)]
    pub working_directory: Option<String>,
}

fn default_skip_errors() -> bool {
    true
}

/// One successfully read file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContent {
    /// Resolved file path.
    pub file_path: String,

    /// Full file content.
    pub content: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Read files tool - batch full-content reads.
pub struct ReadFilesTool;

impl ReadFilesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "read_files";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Read the full content of one or more UTF-8 text files, each with a max size limit of 10MB. Returns a list of file path and content pairs. Unreadable files are skipped unless skip_errors is false.";

    /// Execute the tool logic.
    pub async fn execute(params: ReadFilesParams) -> Result<serde_json::Value, ToolError> {
        if params.file_paths.is_empty() {
            return Err(ToolError::invalid_arguments(
                "File paths must be a non-empty list",
            ));
        }

        let mut content_list = Vec::with_capacity(params.file_paths.len());
        for file_path in &params.file_paths {
            match read_one(file_path, params.working_directory.as_deref()).await {
                Ok(entry) => content_list.push(entry),
                Err(e) if params.skip_errors => {
                    warn!("Skipping '{file_path}': {e}");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            "Read {} of {} requested files",
            content_list.len(),
            params.file_paths.len()
        );

        Ok(serde_json::json!({ "content_list": content_list }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ReadFilesParams>(),
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
                    let params: ReadFilesParams = parse_params(args)?;
                    Self::execute(params).await
                }
                .boxed()
            }),
        )
    }
}

async fn read_one(
    file_path: &str,
    working_directory: Option<&str>,
) -> Result<FileContent, ToolError> {
    let path = resolve_path(file_path, working_directory)?;

    let metadata = tokio::fs::metadata(&path).await.map_err(|e| {
        ToolError::execution_failed(format!(
            "File '{}' does not exist or is not readable: {e}",
            display_path(&path)
        ))
    })?;
    if !metadata.is_file() {
        return Err(ToolError::execution_failed(format!(
            "Path '{}' is not a regular file",
            display_path(&path)
        )));
    }
    if metadata.len() > MAX_FILE_BYTES {
        return Err(ToolError::execution_failed(format!(
            "File '{}' exceeds maximum size limit of 10MB",
            display_path(&path)
        )));
    }

    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        ToolError::execution_failed(format!("Error reading '{}': {e}", display_path(&path)))
    })?;
    let content = String::from_utf8(bytes).map_err(|_| {
        ToolError::execution_failed(format!(
            "File '{}' content is not valid UTF-8",
            display_path(&path)
        ))
    })?;

    Ok(FileContent {
        file_path: display_path(&path),
        content,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    async fn run(args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let params: ReadFilesParams = serde_json::from_value(args).unwrap();
        ReadFilesTool::execute(params).await
    }

    #[tokio::test]
    async fn test_read_multiple_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "alpha").unwrap();
        std::fs::write(&b, "beta").unwrap();

        let value = run(json!({
            "file_paths": [a.to_string_lossy(), b.to_string_lossy()],
        }))
        .await
        .unwrap();

        let list = value["content_list"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["content"], json!("alpha"));
        assert_eq!(list[1]["content"], json!("beta"));
    }

    #[tokio::test]
    async fn test_empty_list_rejected() {
        let err = run(json!({"file_paths": []})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_missing_file_skipped_by_default() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        std::fs::write(&a, "alpha").unwrap();

        let value = run(json!({
            "file_paths": [a.to_string_lossy(), "/nonexistent/path/12345.txt"],
        }))
        .await
        .unwrap();

        let list = value["content_list"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["content"], json!("alpha"));
    }

    #[tokio::test]
    async fn test_missing_file_fails_when_strict() {
        let err = run(json!({
            "file_paths": ["/nonexistent/path/12345.txt"],
            "skip_errors": false,
        }))
        .await
        .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn test_directory_rejected() {
        let dir = TempDir::new().unwrap();
        let err = run(json!({
            "file_paths": [dir.path().to_string_lossy()],
            "skip_errors": false,
        }))
        .await
        .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn test_non_utf8_file_fails_when_strict() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.dat");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = run(json!({
            "file_paths": [path.to_string_lossy()],
            "skip_errors": false,
        }))
        .await
        .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }
}
