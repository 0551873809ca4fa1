use thiserror::Error;

use crate::domain::id::SubscriberId;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures talking to the upstream trade provider.
///
/// Fetch operations never retry on their own. Whether a failure is worth
/// retrying is decided by the caller (the monitor simply waits for its next
/// tick).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Credentials rejected by the provider.
    #[error("provider rejected credentials: {0}")]
    Auth(String),

    /// Network-level failure (timeout, connection reset, 5xx, rate limit).
    #[error("transient provider failure: {0}")]
    Transient(String),

    /// The provider answered with a payload we cannot interpret.
    #[error("unexpected provider payload: {0}")]
    Protocol(String),

    /// A lookup matched nothing.
    #[error("not found: {0}")]
    NotFound(String),
}

impl FetchError {
    /// Whether a later attempt has a reasonable chance of succeeding.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return match status.as_u16() {
                401 | 403 => Self::Auth(err.to_string()),
                408 | 429 | 500..=599 => Self::Transient(err.to_string()),
                _ => Self::Protocol(err.to_string()),
            };
        }
        if err.is_timeout() || err.is_connect() || err.is_request() {
            Self::Transient(err.to_string())
        } else {
            Self::Protocol(err.to_string())
        }
    }
}

/// Control-plane errors returned by start/stop.
///
/// These are user-facing answers, not operational failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("monitor already running for {subscriber}")]
    AlreadyRunning { subscriber: SubscriberId },

    #[error("no running monitor for {subscriber}")]
    NotRunning { subscriber: SubscriberId },

    #[error("invalid threshold for {subscriber}: {reason}")]
    InvalidThreshold {
        subscriber: SubscriberId,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
