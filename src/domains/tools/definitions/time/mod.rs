//! Time and date tools.

mod current_time;
mod time_diff;
mod unix_timestamp;

pub use current_time::CurrentTimeTool;
pub use time_diff::TimeDiffTool;
pub use unix_timestamp::UnixTimestampTool;

/// Default strftime format shared by the time tools.
pub(crate) const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}
