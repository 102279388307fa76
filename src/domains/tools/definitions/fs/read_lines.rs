//! Read lines tool definition.
//!
//! Reads a window of lines from a UTF-8 text file. A negative begin line
//! addresses the window from the end of the file; returned content is capped
//! at 10 MiB.

use std::collections::VecDeque;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::{MAX_FILE_BYTES, display_path, resolve_path};
use crate::domains::tools::{ToolDescriptor, ToolError, parse_params};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the read lines tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ReadLinesParams {
    /// File path to read lines from, absolute or relative, required.
    pub file_path: String,

    /// Working directory to use for relative file paths, optional, defaults
    /// to the current working directory.
    #[serde(default)]
    pub working_directory: Option<String>,

    /// Beginning position to read from, optional, defaults to 1. Negative
    /// values indicate reading from the N-th to last line, e.g. -1 means the
    /// last line, -2 the second to last. Zero is invalid.
    #[serde(default = "default_begin_line")]
    pub begin_line: i64,

    /// Maximum number of lines to read, optional, defaults to 200, max 10000.
    #[serde(default = "default_max_lines")]
    pub max_lines: i64,
}

fn default_begin_line() -> i64 {
    1
}

fn default_max_lines() -> i64 {
    200
}

/// Result payload for the read lines tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadLinesResult {
    /// Resolved file path.
    pub file_path: String,

    /// The begin line that was requested.
    pub begin_line: i64,

    /// Number of lines actually read.
    pub read_lines: usize,

    /// The content lines, without trailing line terminators.
    pub lines: Vec<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Read lines tool - windowed line reads from a text file.
pub struct ReadLinesTool;

impl ReadLinesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "read_lines";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Read the lines of a UTF-8 text file with a max content limit of 10MB. Returns the lines as a list of strings. A negative begin_line reads from the end of the file.";

    /// Execute the tool logic.
    pub async fn execute(params: ReadLinesParams) -> Result<serde_json::Value, ToolError> {
        if params.begin_line == 0 {
            return Err(ToolError::invalid_arguments(
                "Begin line must be a non-zero integer",
            ));
        }
        if !(1..=10_000).contains(&params.max_lines) {
            return Err(ToolError::invalid_arguments(
                "Max lines must be a positive integer between 1 and 10000",
            ));
        }

        let path = resolve_path(&params.file_path, params.working_directory.as_deref())?;
        let max_lines = params.max_lines as usize;

        debug!(
            "Reading lines from '{}', begin line {}, max lines {}",
            path.display(),
            params.begin_line,
            max_lines
        );

        let file = tokio::fs::File::open(&path).await.map_err(|e| {
            ToolError::execution_failed(format!(
                "File '{}' does not exist or is not readable: {e}",
                display_path(&path)
            ))
        })?;

        let mut reader = BufReader::new(file).lines();
        let lines = if params.begin_line < 0 {
            read_tail_window(&mut reader, params.begin_line.unsigned_abs() as usize, max_lines)
                .await?
        } else {
            read_forward(&mut reader, params.begin_line as usize, max_lines).await?
        };

        let result = ReadLinesResult {
            file_path: display_path(&path),
            begin_line: params.begin_line,
            read_lines: lines.len(),
            lines,
        };

        serde_json::to_value(result).map_err(|e| ToolError::execution_failed(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ReadLinesParams>(),
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
                    let params: ReadLinesParams = parse_params(args)?;
                    Self::execute(params).await
                }
                .boxed()
            }),
        )
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

type Lines = tokio::io::Lines<BufReader<tokio::fs::File>>;

/// Read up to `max_lines` lines starting at 1-based line `begin`.
async fn read_forward(
    reader: &mut Lines,
    begin: usize,
    max_lines: usize,
) -> Result<Vec<String>, ToolError> {
    let mut lines = Vec::new();
    let mut total_bytes: u64 = 0;
    let mut index: usize = 0;

    while let Some(line) = next_line(reader).await? {
        index += 1;
        if index < begin {
            continue;
        }
        total_bytes += line.len() as u64;
        if total_bytes > MAX_FILE_BYTES {
            return Err(content_too_large());
        }
        lines.push(line);
        if lines.len() == max_lines {
            break;
        }
    }

    Ok(lines)
}

/// Single pass for a negative begin line: keep only the last
/// `from_end + max_lines` lines, then slice the requested window out of it.
async fn read_tail_window(
    reader: &mut Lines,
    from_end: usize,
    max_lines: usize,
) -> Result<Vec<String>, ToolError> {
    let capacity = from_end + max_lines;
    let mut window: VecDeque<String> = VecDeque::with_capacity(capacity);

    while let Some(line) = next_line(reader).await? {
        if window.len() == capacity {
            window.pop_front();
        }
        window.push_back(line);
    }

    let len = window.len();
    let start = len.saturating_sub(from_end);
    let take = max_lines.min(from_end).min(len - start);

    let mut lines = Vec::with_capacity(take);
    let mut total_bytes: u64 = 0;
    for line in window.into_iter().skip(start).take(take) {
        total_bytes += line.len() as u64;
        if total_bytes > MAX_FILE_BYTES {
            return Err(content_too_large());
        }
        lines.push(line);
    }

    Ok(lines)
}

async fn next_line(reader: &mut Lines) -> Result<Option<String>, ToolError> {
    reader.next_line().await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            ToolError::execution_failed("File content is not valid UTF-8")
        } else {
            ToolError::execution_failed(format!("Error reading file: {e}"))
        }
    })
}

fn content_too_large() -> ToolError {
    ToolError::execution_failed("Content exceeds maximum size limit of 10MB")
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
        let params: ReadLinesParams = serde_json::from_value(args).unwrap();
        ReadLinesTool::execute(params).await
    }

    fn fixture(lines: usize) -> (TempDir, String) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.txt");
        let content: String = (1..=lines).map(|i| format!("line {i}\n")).collect();
        std::fs::write(&path, content).unwrap();
        let path = path.to_string_lossy().to_string();
        (dir, path)
    }

    #[tokio::test]
    async fn test_read_from_start() {
        let (_dir, path) = fixture(10);
        let value = run(json!({"file_path": path, "max_lines": 3})).await.unwrap();
        assert_eq!(value["read_lines"], json!(3));
        assert_eq!(value["lines"], json!(["line 1", "line 2", "line 3"]));
    }

    #[tokio::test]
    async fn test_read_from_offset() {
        let (_dir, path) = fixture(10);
        let value = run(json!({"file_path": path, "begin_line": 8})).await.unwrap();
        assert_eq!(value["lines"], json!(["line 8", "line 9", "line 10"]));
    }

    #[tokio::test]
    async fn test_negative_begin_reads_tail() {
        let (_dir, path) = fixture(10);
        let value = run(json!({"file_path": path, "begin_line": -2})).await.unwrap();
        assert_eq!(value["lines"], json!(["line 9", "line 10"]));
    }

    #[tokio::test]
    async fn test_negative_begin_capped_by_max_lines() {
        let (_dir, path) = fixture(10);
        let value = run(json!({"file_path": path, "begin_line": -5, "max_lines": 2}))
            .await
            .unwrap();
        assert_eq!(value["lines"], json!(["line 6", "line 7"]));
    }

    #[tokio::test]
    async fn test_zero_begin_line_invalid() {
        let (_dir, path) = fixture(3);
        let err = run(json!({"file_path": path, "begin_line": 0})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_max_lines_out_of_range() {
        let (_dir, path) = fixture(3);
        let err = run(json!({"file_path": path, "max_lines": 20000})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = run(json!({"file_path": "/nonexistent/path/12345.txt"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn test_non_utf8_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.dat");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41, b'\n']).unwrap();
        let err = run(json!({"file_path": path.to_string_lossy()})).await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn test_relative_path_with_working_directory() {
        let (dir, _path) = fixture(3);
        let value = run(json!({
            "file_path": "data.txt",
            "working_directory": dir.path().to_string_lossy(),
        }))
        .await
        .unwrap();
        assert_eq!(value["read_lines"], json!(3));
    }
}
