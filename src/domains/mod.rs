//! Domain modules organized by bounded context.
//!
//! Currently the only domain is `tools`: the catalog of utility operations
//! exposed over MCP together with its registry and dispatch machinery.

pub mod tools;
