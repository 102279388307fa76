//! File system tools.

mod read_files;
mod read_lines;

pub use read_files::ReadFilesTool;
pub use read_lines::ReadLinesTool;

use std::path::PathBuf;

use crate::domains::tools::ToolError;

/// Per-file content ceiling shared by the read tools.
pub(crate) const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Resolve a caller-supplied path: trim, expand a leading `~/`, and join
/// relative paths onto the working directory (defaulting to the process
/// cwd). The result is not required to exist.
pub(crate) fn resolve_path(
    file_path: &str,
    working_directory: Option<&str>,
) -> Result<PathBuf, ToolError> {
    let trimmed = file_path.trim();
    if trimmed.is_empty() {
        return Err(ToolError::invalid_arguments(
            "File path must be a non-empty string",
        ));
    }

    let expanded = match trimmed.strip_prefix("~/") {
        Some(rest) => match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(rest),
            None => PathBuf::from(trimmed),
        },
        None => PathBuf::from(trimmed),
    };

    if expanded.is_absolute() {
        return Ok(expanded);
    }

    let base = match working_directory.map(str::trim).filter(|s| !s.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().map_err(|e| {
            ToolError::execution_failed(format!("Cannot determine working directory: {e}"))
        })?,
    };

    Ok(base.join(expanded))
}

/// Render a path with forward slashes on every OS, for stable output.
pub(crate) fn display_path(path: &std::path::Path) -> String {
    path.display().to_string().replace('\\', "/")
}
