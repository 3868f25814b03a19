//! MCP JSON-RPC protocol handler.
//!
//! Reads newline-delimited JSON-RPC messages, routes `tools/call` to the
//! directory tools, and writes one response line per request. Implements
//! `initialize`, `notifications/initialized`, `ping`, `tools/list` and
//! `tools/call`. Diagnostic logs go to stderr; stdout carries only protocol
//! messages.

use std::sync::Arc;

use hr_core::Directory;
use serde::Serialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, JsonRpcRequest,
    JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, ToolResult,
};
use super::tools;
use crate::config::Config;
use crate::error::Result;

/// The directory shared by every transport, behind a single lock.
pub type SharedDirectory = Arc<Mutex<Directory>>;

/// Protocol state: the shared directory plus the announced identity.
///
/// Cheap to clone; clones share the same directory.
#[derive(Debug, Clone)]
pub struct McpServer {
    directory: SharedDirectory,
    config: Arc<Config>,
}

impl McpServer {
    /// Wrap a directory for serving.
    pub fn new(directory: Directory, config: Config) -> Self {
        Self {
            directory: Arc::new(Mutex::new(directory)),
            config: Arc::new(config),
        }
    }

    /// A server over a freshly seeded directory.
    pub fn seeded(config: Config) -> Self {
        Self::new(Directory::seeded(config.id_policy), config)
    }

    /// The shared directory.
    pub fn directory(&self) -> &SharedDirectory {
        &self.directory
    }

    /// Handle one raw message. Returns `None` when nothing should be sent.
    ///
    /// Text that is not JSON is a parse error; JSON that is not a request is
    /// an invalid request, answered with its `id` when one can be read.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparseable JSON-RPC message");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                ));
            }
        };

        let raw_id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "malformed JSON-RPC request");
                return Some(JsonRpcResponse::error(
                    raw_id,
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return request.id.map(|id| {
                JsonRpcResponse::error(id, INVALID_REQUEST, "Invalid JSON-RPC version")
            });
        }

        let response = self.handle_request(&request).await;

        // Notifications never get a response, even when the method produced one.
        if request.is_notification() {
            return None;
        }
        response
    }

    /// Dispatch a parsed request.
    pub async fn handle_request(&self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone().unwrap_or(Value::Null);

        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(id)),
            "initialized" | "notifications/initialized" => {
                info!("client initialized");
                None
            }
            "notifications/cancelled" => {
                info!(params = %request.params, "request cancelled");
                None
            }
            "ping" => Some(JsonRpcResponse::success(id, json!({}))),
            "tools/list" => Some(handle_tools_list(id)),
            "tools/call" => Some(self.handle_tools_call(id, &request.params).await),
            other => {
                debug!(method = other, "unknown method");
                Some(JsonRpcResponse::error(
                    id,
                    METHOD_NOT_FOUND,
                    format!("Unknown method: {}", other),
                ))
            }
        }
    }

    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": self.config.protocol_version,
                "capabilities": {
                    "tools": { "listChanged": false }
                },
                "serverInfo": {
                    "name": self.config.server_name,
                    "version": self.config.server_version
                }
            }),
        )
    }

    async fn handle_tools_call(&self, id: Value, params: &Value) -> JsonRpcResponse {
        let Some(name) = params
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
        else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing tool name in params");
        };
        let args = params
            .get("arguments")
            .filter(|args| !args.is_null())
            .cloned()
            .unwrap_or_else(|| json!({}));

        info!(tool = name, "tool call");
        let output = {
            let mut directory = self.directory.lock().await;
            tools::call_tool(&mut directory, name, args)
        };

        let result = match output {
            Ok(output) => match output.into_text() {
                Ok(text) => ToolResult::text(text),
                Err(e) => ToolResult::error(format!("Failed to encode result of {}: {}", name, e)),
            },
            Err(e) => {
                warn!(tool = name, error = %e, "tool call failed");
                ToolResult::error(e.to_string())
            }
        };

        match serde_json::to_value(&result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }

    /// Serve newline-delimited messages until the reader hits EOF.
    ///
    /// A line that is not valid UTF-8 is answered with a parse error; only
    /// transport failures end the loop early.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    self.handle_message(line).await
                }
                Err(e) => {
                    warn!(error = %e, "message is not valid UTF-8");
                    Some(JsonRpcResponse::error(
                        Value::Null,
                        PARSE_ERROR,
                        format!("Invalid UTF-8: {}", e),
                    ))
                }
            };

            if let Some(response) = response {
                write_message(&mut writer, &response).await?;
            }
        }

        info!("input closed, shutting down");
        Ok(())
    }

    /// Serve on the process's stdin and stdout.
    pub async fn run_stdio(&self) -> Result<()> {
        info!(
            server = %self.config.server_name,
            id_policy = %self.config.id_policy,
            "MCP server running on stdio"
        );
        let stdin = BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await
    }
}

/// Handle `tools/list`.
fn handle_tools_list(id: Value) -> JsonRpcResponse {
    match serde_json::to_value(tools::definitions()) {
        Ok(tools) => JsonRpcResponse::success(id, json!({ "tools": tools })),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
    }
}

/// Write one message as a single line and flush.
async fn write_message<W, T>(writer: &mut W, message: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut line = serde_json::to_vec(message)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}
