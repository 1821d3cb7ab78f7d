use thiserror::Error;

/// Top-level error type used across the entire dashboard.
#[derive(Debug, Error)]
pub enum DashError {
    /// A chart's host region could not be resolved; the chart stays inert.
    #[error("construction error: {0}")]
    Construction(String),

    /// An invalid setting was handed to a component (capacity < 2, bad interval, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Fetch(#[from] FetchFailed),

    #[error("config error: {0}")]
    Config(String),

    #[error("system error: {0}")]
    System(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// A snapshot could not be acquired this tick.
///
/// Opaque beyond its message: network errors, non-success statuses and
/// malformed payloads all collapse into this one condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fetch failed: {message}")]
pub struct FetchFailed {
    pub message: String,
}

impl FetchFailed {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

pub type Result<T, E = DashError> = std::result::Result<T, E>;
