//! Resolved runtime configuration.
//!
//! The CLI (`clap`, with environment fallbacks) produces a [`Config`]; the
//! transports only ever read it.

use hr_core::IdPolicy;
use tracing_subscriber::EnvFilter;

/// Default `tracing` filter when neither `--log-filter` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// MCP protocol revision announced in `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name announced in `initialize`.
pub const SERVER_NAME: &str = "HRManagement";

/// Settings shared by every transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How new employees get their identifier.
    pub id_policy: IdPolicy,
    pub server_name: String,
    pub server_version: String,
    pub protocol_version: String,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_policy: IdPolicy::default(),
            server_name: SERVER_NAME.to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            protocol_version: PROTOCOL_VERSION.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Default configuration with the given ID policy.
    #[must_use]
    pub fn with_id_policy(id_policy: IdPolicy) -> Self {
        Self {
            id_policy,
            ..Self::default()
        }
    }

    /// Replace the log filter.
    #[must_use]
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

/// Build the `tracing` filter for `directive`.
///
/// An unparseable directive falls back to [`DEFAULT_LOG_FILTER`]; the second
/// value is then a warning for the operator.
pub fn env_filter(directive: &str) -> (EnvFilter, Option<String>) {
    match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(e) => (
            EnvFilter::new(DEFAULT_LOG_FILTER),
            Some(format!(
                "warning: invalid log filter {directive:?} ({e}), using {DEFAULT_LOG_FILTER:?}"
            )),
        ),
    }
}
