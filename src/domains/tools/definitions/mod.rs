//! Individual tool implementations, one file per tool.
//!
//! Each definition provides a parameter struct (serde + schemars, with
//! `deny_unknown_fields`), an `execute()` with the tool logic, a `to_tool()`
//! metadata constructor, and a `descriptor()` that packages both for the
//! registry.

pub mod fs;
pub mod net;
pub mod system;
pub mod time;
pub(crate) mod units;
pub mod util;

pub use fs::{ReadFilesTool, ReadLinesTool};
pub use net::{ConnectivityTool, PingTool};
pub use system::{SystemInfoTool, SystemStatsTool};
pub use time::{CurrentTimeTool, TimeDiffTool, UnixTimestampTool};
pub use util::{EvaluateTool, GenerateUuidTool, SleepTool};
