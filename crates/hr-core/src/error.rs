//! Error types for the directory core.
//!
//! Directory operations themselves never fail; these cover parsing of the
//! values the app layer feeds in (configuration and timestamps).

use thiserror::Error;

/// Errors raised by `hr-core`.
#[derive(Debug, Error)]
pub enum Error {
    /// The ID policy name is not one of the known policies.
    #[error("unknown id policy '{0}' (expected 'monotonic' or 'length-plus-one')")]
    UnknownIdPolicy(String),

    /// A timestamp string is not ISO-8601.
    #[error("invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Result alias for `hr-core`.
pub type Result<T> = std::result::Result<T, Error>;
