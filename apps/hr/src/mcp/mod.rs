//! MCP (Model Context Protocol) server.
//!
//! - `protocol` -- JSON-RPC 2.0 message types and tool result shapes
//! - `tools`    -- the six directory tools (definitions, argument parsing, dispatch)
//! - `server`   -- request routing and the stdio loop

pub mod protocol;
pub mod server;
pub mod tools;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolContent, ToolResult};
pub use server::{McpServer, SharedDirectory};
pub use tools::{ToolDefinition, ToolError, ToolOutput};
