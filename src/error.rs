/// Error types for loading the sales dataset.
///
/// Every variant is recoverable: the dashboard degrades to an empty record
/// set and shows the message instead of stopping.

use thiserror::Error;

/// Invalid or missing environment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing configuration variable(s): {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Failure to produce the record set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database unreachable or authentication refused.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The sales query failed.
    #[error("Query error: {0}")]
    Query(String),

    /// A returned row could not be turned into a record.
    #[error("Invalid row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

pub type Result<T> = std::result::Result<T, LoadError>;
