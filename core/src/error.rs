//! Error types for the beer API client.
//!
//! # Design
//! Every failure an operation can produce is a variant of `ApiError`, so the
//! outcome of a call is always `Result<T, ApiError>` and callers match on it
//! instead of catching anything. `NotFound` gets a dedicated variant because
//! callers frequently implement existence checks; every other non-2xx status
//! lands in `Rejected` with the raw status and body.
//!
//! Transports report their own failures as `TransportError`, which converts
//! into `ApiError::Transport` and never overlaps with status-code failures.

use thiserror::Error;

/// Errors returned by `BeerClient` operations and `BeerRequests` methods.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller supplied invalid input; no request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The server returned 404 for the requested beer.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {}", .body.as_deref().unwrap_or("<empty body>"))]
    Rejected { status: u16, body: Option<String> },

    /// The request never completed (connection refused, timeout, DNS).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("decode failure: {0}")]
    Decode(String),
}

/// Payload-free discriminant of `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Rejected,
    Transport,
    Decode,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::InvalidInput(_) => ErrorKind::InvalidInput,
            ApiError::NotFound => ErrorKind::NotFound,
            ApiError::Rejected { .. } => ErrorKind::Rejected,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Decode(_) => ErrorKind::Decode,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// HTTP status attached to the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A request that never produced an HTTP response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("{0}")]
    Other(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
