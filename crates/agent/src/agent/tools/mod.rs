//! Agent Tools Module
//!
//! Provides the tools the LLM agent can call while troubleshooting a
//! cluster. Every tool returns its result as a plain string and converts
//! every failure into a string as well, so no error ever crosses the
//! tool-calling boundary.

pub mod file;
pub mod prometheus;
pub mod search;
pub mod shell;

use thiserror::Error;

/// Error type required by the rig tool trait. The tools report failures
/// as strings in their output instead, so this only surfaces if the
/// model produces arguments that do not match a tool's schema.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid tool arguments: {0}")]
    InvalidArgs(String),
}
