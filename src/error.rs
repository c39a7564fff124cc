//! # Errors
//!
//! Error taxonomy for the API client and reconcilers.
//!
//! The transport only ever produces [`HttpError`]. The resource client
//! classifies it into an [`Error`] variant; everything above propagates that
//! variant unchanged, except that a 404 answer to a DELETE is absorbed as
//! "already absent".

use crate::client::Method;
use std::fmt;
use thiserror::Error;

/// Failure class of a single HTTP exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpErrorKind {
    /// The request exceeded the configured timeout
    Timeout,
    /// Connection could not be established; nothing reached the server
    ConnectionError,
    /// Connection dropped after the request was sent
    Interrupted,
    /// 4xx response
    ClientError,
    /// 5xx response
    ServerError,
    /// 2xx response whose body is not valid JSON
    Decode,
}

impl HttpErrorKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpErrorKind::Timeout => "timeout",
            HttpErrorKind::ConnectionError => "connection_error",
            HttpErrorKind::Interrupted => "interrupted",
            HttpErrorKind::ClientError => "client_error",
            HttpErrorKind::ServerError => "server_error",
            HttpErrorKind::Decode => "decode",
        }
    }
}

impl fmt::Display for HttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final failure of a transport request, after retries were exhausted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    pub method: Method,
    pub path: String,
    /// HTTP status, absent for timeouts and connection failures
    pub status: Option<u16>,
    /// Response body or the underlying client error message
    pub body: String,
    pub kind: HttpErrorKind,
    /// Number of requests issued, including the first one
    pub attempts: u32,
}

impl HttpError {
    /// Whether the transport may retry this failure.
    ///
    /// 429 is the only retryable 4xx.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self.kind {
            HttpErrorKind::Timeout
            | HttpErrorKind::ConnectionError
            | HttpErrorKind::Interrupted
            | HttpErrorKind::ServerError => true,
            HttpErrorKind::ClientError => self.status == Some(429),
            HttpErrorKind::Decode => false,
        }
    }

    /// A mutating request that may or may not have been applied server-side
    #[must_use]
    pub fn is_outcome_unknown(&self) -> bool {
        self.method.is_mutating()
            && matches!(self.kind, HttpErrorKind::Timeout | HttpErrorKind::Interrupted)
    }

    #[must_use]
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} failed", self.method, self.path)?;
        match (self.kind, self.status) {
            (HttpErrorKind::Decode, Some(status)) => {
                write!(f, ": HTTP {status} body is not valid JSON")?;
            }
            (_, Some(status)) => write!(f, " with HTTP {status}")?,
            (_, None) => write!(f, " ({})", self.kind)?,
        }
        if self.attempts > 1 {
            write!(f, " after {} attempts", self.attempts)?;
        }
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

/// Error classes surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    NotFound,
    Conflict,
    RateLimited,
    TransientNetwork,
    Server,
    Client,
    UnknownOutcome,
    InvalidResponse,
}

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or contradictory caller input, reported before any network call
    #[error("configuration error: {0}")]
    Configuration(String),
    /// 401 or 403
    #[error("authentication failed: {0}")]
    Authentication(HttpError),
    #[error("resource not found: {0}")]
    NotFound(HttpError),
    #[error("conflict: {0}")]
    Conflict(HttpError),
    /// 429 that outlived every retry
    #[error("rate limited: {0}")]
    RateLimited(HttpError),
    /// Timeout or connection failure on a read, after retries
    #[error("network error: {0}")]
    TransientNetwork(HttpError),
    /// 5xx after retries
    #[error("server error: {0}")]
    Server(HttpError),
    /// Any other 4xx
    #[error("request rejected: {0}")]
    Client(HttpError),
    /// Timeout or dropped connection on a mutating call; the change may or
    /// may not have been applied.
    /// Re-query before retrying.
    #[error("outcome unknown, re-query before retrying: {0}")]
    UnknownOutcome(HttpError),
    /// 2xx answer whose body is not JSON; the raw body is kept
    #[error("invalid response: {0}")]
    Undecodable(HttpError),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Classify a transport failure
    #[must_use]
    pub fn from_http(err: HttpError) -> Self {
        match (err.kind, err.status) {
            _ if err.is_outcome_unknown() => Error::UnknownOutcome(err),
            (
                HttpErrorKind::Timeout | HttpErrorKind::ConnectionError | HttpErrorKind::Interrupted,
                _,
            ) => Error::TransientNetwork(err),
            (HttpErrorKind::Decode, _) => Error::Undecodable(err),
            (_, Some(401 | 403)) => Error::Authentication(err),
            (_, Some(404)) => Error::NotFound(err),
            (_, Some(409)) => Error::Conflict(err),
            (_, Some(429)) => Error::RateLimited(err),
            (HttpErrorKind::ServerError, _) => Error::Server(err),
            (HttpErrorKind::ClientError, _) => Error::Client(err),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::Authentication(_) => ErrorKind::Authentication,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Conflict(_) => ErrorKind::Conflict,
            Error::RateLimited(_) => ErrorKind::RateLimited,
            Error::TransientNetwork(_) => ErrorKind::TransientNetwork,
            Error::Server(_) => ErrorKind::Server,
            Error::Client(_) => ErrorKind::Client,
            Error::UnknownOutcome(_) => ErrorKind::UnknownOutcome,
            Error::Undecodable(_) | Error::InvalidResponse(_) => ErrorKind::InvalidResponse,
        }
    }

    /// The underlying transport failure, when there is one
    #[must_use]
    pub fn http_error(&self) -> Option<&HttpError> {
        match self {
            Error::Authentication(e)
            | Error::NotFound(e)
            | Error::Conflict(e)
            | Error::RateLimited(e)
            | Error::TransientNetwork(e)
            | Error::Server(e)
            | Error::Client(e)
            | Error::UnknownOutcome(e)
            | Error::Undecodable(e) => Some(e),
            Error::Configuration(_) | Error::InvalidResponse(_) => None,
        }
    }
}

impl From<HttpError> for Error {
    fn from(err: HttpError) -> Self {
        Error::from_http(err)
    }
}
