//! System information and status tools.

mod info;
mod stats;

pub use info::SystemInfoTool;
pub use stats::SystemStatsTool;
