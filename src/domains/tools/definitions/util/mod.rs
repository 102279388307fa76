//! General utility tools.

mod eval;
mod sleep;
mod uuid_gen;

pub use eval::EvaluateTool;
pub use sleep::SleepTool;
pub use uuid_gen::GenerateUuidTool;
