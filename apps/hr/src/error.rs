//! Application error type.

use crate::mcp::ToolError;
use thiserror::Error;

/// Errors surfaced by the CLI and the transports.
///
/// Bad tool calls never reach this type: they are answered in-band.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading from or writing to a transport failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be resolved.
    #[error(transparent)]
    Core(#[from] hr_core::Error),

    /// A tool invoked from the CLI failed.
    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// Result alias for the app crate.
pub type Result<T> = std::result::Result<T, Error>;
