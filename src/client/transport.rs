//! # HTTP Transport
//!
//! Authenticated JSON requests against the Confluent Cloud management API.
//!
//! The transport:
//! - Applies HTTP basic authentication from [`ApiCredentials`]
//! - Bounds every request by the configured timeout
//! - Retries transient failures (timeouts, connection errors, 5xx, 429) with
//!   exponential backoff capped at `retry_max_delay`
//! - Fails immediately on any other 4xx
//!
//! Timeouts and dropped connections on mutating calls are never retried: the
//! request may already have been applied server-side, so the caller has to
//! re-query first.

use crate::client::backoff::ExponentialBackoff;
use crate::config::{ApiConfig, ApiCredentials};
use crate::constants::USER_AGENT;
use crate::error::{Error, HttpError, HttpErrorKind, Result};
use crate::observability::metrics;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, RETRY_AFTER};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, debug_span, warn, Instrument};

/// HTTP methods used by the resource client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Whether the request changes server-side state
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request/response seam between the resource client and the network
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a request and return the decoded JSON body
    ///
    /// An empty success body decodes to `Value::Null`.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> std::result::Result<Value, HttpError>;
}

/// Failure of one attempt, with the server's retry hint if any
struct AttemptFailure {
    error: HttpError,
    retry_after: Option<Duration>,
}

/// reqwest-backed [`Transport`]
pub struct HttpTransport {
    http_client: Client,
    config: ApiConfig,
    credentials: ApiCredentials,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Create a transport for one invocation
    ///
    /// # Errors
    /// Returns a configuration error if the settings are invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: ApiConfig, credentials: ApiCredentials) -> Result<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Configuration(format!("failed to create HTTP client: {e}")))?;

        debug!(
            endpoint = %config.endpoint,
            timeout_secs = config.timeout.as_secs(),
            retries = config.retries,
            "Initialized Confluent Cloud API transport"
        );

        Ok(Self {
            http_client,
            config,
            credentials,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> std::result::Result<Value, AttemptFailure> {
        let url = self.config.url_for(path);

        let mut request = self
            .http_client
            .request(method.into(), &url)
            .basic_auth(
                self.credentials.api_key(),
                Some(self.credentials.api_secret()),
            )
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| request_failure(method, path, &e))?;

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let text = response
            .text()
            .await
            .map_err(|e| request_failure(method, path, &e))?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(|e| {
                debug!(method = method.as_str(), path, error = %e, "Response body is not JSON");
                AttemptFailure {
                    error: HttpError {
                        method,
                        path: path.to_string(),
                        status: Some(status.as_u16()),
                        body: text,
                        kind: HttpErrorKind::Decode,
                        attempts: 1,
                    },
                    retry_after: None,
                }
            });
        }

        let kind = if status.is_server_error() {
            HttpErrorKind::ServerError
        } else {
            HttpErrorKind::ClientError
        };

        Err(AttemptFailure {
            error: HttpError {
                method,
                path: path.to_string(),
                status: Some(status.as_u16()),
                body: text,
                kind,
                attempts: 1,
            },
            retry_after,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> std::result::Result<Value, HttpError> {
        let mut backoff =
            ExponentialBackoff::new(self.config.retry_base_delay, self.config.retry_max_delay);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let span = debug_span!(
                "confluent.api.request",
                http.method = method.as_str(),
                http.path = path,
                attempt
            );
            let start = Instant::now();
            let outcome = self.send_once(method, path, body).instrument(span).await;
            let elapsed = start.elapsed().as_secs_f64();

            let failure = match outcome {
                Ok(value) => {
                    metrics::record_api_request(method.as_str(), "success", elapsed);
                    return Ok(value);
                }
                Err(failure) => failure,
            };
            metrics::record_api_request(method.as_str(), failure.error.kind.as_str(), elapsed);

            if !failure.error.is_transient()
                || failure.error.is_outcome_unknown()
                || attempt > self.config.retries
            {
                return Err(failure.error.with_attempts(attempt));
            }

            // Honour Retry-After, still bounded by retry_max_delay
            let computed = backoff.next_backoff();
            let delay = failure
                .retry_after
                .map_or(computed, |hint| hint.min(backoff.max()));

            warn!(
                method = method.as_str(),
                path,
                status = failure.error.status,
                kind = failure.error.kind.as_str(),
                attempt,
                wait_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Transient API failure, retrying with backoff"
            );
            metrics::increment_api_retries(method.as_str());
            tokio::time::sleep(delay).await;
        }
    }
}

fn request_failure(method: Method, path: &str, err: &reqwest::Error) -> AttemptFailure {
    let kind = if err.is_timeout() {
        HttpErrorKind::Timeout
    } else if err.is_connect() {
        HttpErrorKind::ConnectionError
    } else {
        HttpErrorKind::Interrupted
    };
    AttemptFailure {
        error: HttpError {
            method,
            path: path.to_string(),
            status: None,
            body: err.to_string(),
            kind,
            attempts: 1,
        },
        retry_after: None,
    }
}

/// `Retry-After` in delta-seconds form; HTTP-date values are ignored
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
