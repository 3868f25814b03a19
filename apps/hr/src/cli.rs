//! # CLI
//!
//! Command-line surface of the `hr` binary.
//!
//! ```text
//! hr [--id-policy <policy>] [--log-filter <filter>] <command>
//!
//!   serve [--http <addr>]     MCP over stdio, or the HTTP facet on <addr>
//!   tools                     print the tool definitions as JSON
//!   call <tool> [<json>]      run one tool on a freshly seeded directory
//! ```

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use hr_core::{Directory, IdPolicy};
use serde_json::Value;
use tracing::info;

use crate::api;
use crate::config::{Config, DEFAULT_LOG_FILTER};
use crate::error::Result;
use crate::mcp::{McpServer, tools};

/// HR employee directory exposed as MCP tools.
#[derive(Debug, Parser)]
#[command(name = "hr", version, about)]
pub struct Cli {
    /// How new employees get their identifier: monotonic or length-plus-one.
    #[arg(long, env = "HR_ID_POLICY", default_value = "monotonic", global = true)]
    pub id_policy: String,

    /// `tracing` filter directive.
    #[arg(long, env = "RUST_LOG", default_value = DEFAULT_LOG_FILTER, global = true)]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the MCP server (stdio unless --http is given).
    Serve {
        /// Serve JSON-RPC over HTTP on this address instead of stdio.
        #[arg(long, env = "HR_HTTP_ADDR")]
        http: Option<SocketAddr>,
    },

    /// Print the tool definitions.
    Tools,

    /// Run a single tool against a freshly seeded directory.
    Call {
        /// Tool name, e.g. get_employee_by_id.
        tool: String,

        /// Tool arguments as a JSON object.
        #[arg(default_value = "{}")]
        args: String,
    },
}

impl Cli {
    /// Resolve flags and environment into a [`Config`].
    pub fn config(&self) -> Result<Config> {
        let id_policy: IdPolicy = self.id_policy.parse()?;
        Ok(Config::with_id_policy(id_policy).log_filter(self.log_filter.clone()))
    }
}

/// Run the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.config()?;

    match cli.command {
        Command::Serve { http } => cmd_serve(config, http).await,
        Command::Tools => {
            println!("{}", cmd_tools()?);
            Ok(())
        }
        Command::Call { tool, args } => {
            println!("{}", cmd_call(&config, &tool, &args)?);
            Ok(())
        }
    }
}

/// Serve MCP on stdio, or HTTP when an address is given.
pub async fn cmd_serve(config: Config, http: Option<SocketAddr>) -> Result<()> {
    let server = McpServer::seeded(config);
    match http {
        Some(addr) => api::serve_http(server, addr).await,
        None => server.run_stdio().await,
    }
}

/// Tool definitions as pretty JSON.
pub fn cmd_tools() -> Result<String> {
    Ok(serde_json::to_string_pretty(&tools::definitions())?)
}

/// Run one tool on a fresh seeded directory and render its output.
pub fn cmd_call(config: &Config, tool: &str, args: &str) -> Result<String> {
    let args: Value = serde_json::from_str(args)?;
    let mut directory = Directory::seeded(config.id_policy);

    info!(tool, "one-shot tool call");
    let output = tools::call_tool(&mut directory, tool, args)?;
    Ok(output.into_text()?)
}
