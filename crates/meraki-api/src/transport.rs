// Shared HTTP transport for the REST client and the SDK session.
//
// Both surfaces share one `reqwest::Client` built here with the API-key
// header, JSON headers, timeout, and user agent. GET retries run on the
// `backoff` crate's async retry.

use std::time::Duration;

use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;

/// Header carrying the dashboard API key.
pub const API_KEY_HEADER: &str = "X-Cisco-Meraki-API-Key";

/// Default dashboard API root.
pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v1";

const USER_AGENT: &str = concat!("meraki-ops/", env!("CARGO_PKG_VERSION"));

// ── RetryPolicy ──────────────────────────────────────────────────────

/// Bounded retry policy for idempotent GET requests.
///
/// Retries connection failures, timeouts, and statuses 429/500/502/503/504.
/// The delay before retry `n` (0-based) is the server's `Retry-After` value
/// when present, otherwise `min(initial_delay * 2^n, max_delay)`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on computed backoff. Does not clamp `Retry-After`.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Statuses worth retrying.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 500 | 502 | 503 | 504)
    }

    /// Deterministic doubling schedule capped at `max_delay`.
    ///
    /// Attempt counting is done by the caller, so the schedule itself never
    /// gives up.
    pub fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_delay)
            .with_multiplier(2.0)
            .with_randomization_factor(0.0)
            .with_max_interval(self.max_delay)
            .with_max_elapsed_time(None)
            .build()
    }
}

/// Client errors worth another attempt: refused connections, timeouts
/// while waiting for headers, and bodies that stall or break mid-read.
fn is_retryable_client_error(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout() || e.is_body()
}

/// Parse a `Retry-After` header given in delta-seconds.
///
/// HTTP-date values are ignored and fall back to computed backoff.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

// ── TransportConfig ──────────────────────────────────────────────────

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with the dashboard default headers.
    ///
    /// Injects the API key (marked sensitive so it never shows in debug
    /// output) and JSON accept/content-type headers.
    pub fn build_client(&self, api_key: &SecretString) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::InvalidApiKey {
                message: format!("invalid API key header value: {e}"),
            })?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?)
    }
}

// ── ApiResponse ──────────────────────────────────────────────────────

/// A successful response with its headers kept for pagination.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Value,
}

impl ApiResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The RFC 5988 `Link` header, if any.
    pub fn link(&self) -> Option<&str> {
        self.header("link")
    }
}

// ── Transport ────────────────────────────────────────────────────────

/// One HTTP session: base URL, pooled client, and retry policy.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
}

/// Outcome of one failed attempt.
#[derive(Debug)]
enum Failure {
    /// Worth retrying while the attempt budget lasts.
    Retryable {
        status: Option<u16>,
        reason: String,
        retry_after: Option<Duration>,
    },
    /// Returned to the caller as is.
    Fatal(Error),
}

impl Failure {
    fn retryable(status: Option<u16>, reason: String) -> Self {
        Self::Retryable {
            status,
            reason,
            retry_after: None,
        }
    }

    /// Map onto the retry driver. Attempt `attempt` of `max_attempts`
    /// (1-based) becomes permanent once the budget is spent.
    fn into_backoff(self, attempt: u32, max_attempts: u32) -> backoff::Error<Error> {
        match self {
            Self::Fatal(err) => backoff::Error::permanent(err),
            Self::Retryable {
                status,
                reason,
                retry_after,
            } => {
                let err = Error::Transport {
                    attempts: attempt,
                    status,
                    reason,
                };
                if attempt >= max_attempts {
                    backoff::Error::permanent(err)
                } else {
                    backoff::Error::Transient { err, retry_after }
                }
            }
        }
    }
}

impl Transport {
    /// Build from an API key and transport config.
    pub fn new(
        base_url: &str,
        api_key: &SecretString,
        config: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = config.build_client(api_key)?;
        Self::from_reqwest(base_url, http, config.retry.clone())
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        retry: RetryPolicy,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            http,
            base_url,
            retry,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Join a server-relative path onto the base URL, keeping the base path.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// GET with the retry policy applied.
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<ApiResponse, Error> {
        let url = self.url(path)?;
        let max_attempts = self.retry.max_attempts();
        let mut attempt: u32 = 0;

        let operation = || {
            attempt += 1;
            let current = attempt;
            let url = url.clone();
            async move {
                debug!("GET {url} params={query:?} attempt={current}");
                self.attempt(url, query)
                    .await
                    .map_err(|failure| failure.into_backoff(current, max_attempts))
            }
        };

        let notify = |err: Error, delay: Duration| {
            warn!(
                path,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "retrying: {err}"
            );
        };

        backoff::future::retry_notify(self.retry.backoff(), operation, notify).await
    }

    /// One request, body included. A body that times out or breaks while
    /// being read counts as a retryable failure.
    async fn attempt(&self, url: Url, query: &[(String, String)]) -> Result<ApiResponse, Failure> {
        let resp = match self.http.get(url).query(query).send().await {
            Ok(resp) => resp,
            Err(e) if is_retryable_client_error(&e) => {
                return Err(Failure::retryable(None, e.to_string()));
            }
            Err(e) => return Err(Failure::Fatal(Error::Client(e))),
        };

        let status = resp.status();
        let code = status.as_u16();
        if !status.is_success() {
            if RetryPolicy::is_retryable_status(code) {
                return Err(Failure::Retryable {
                    status: Some(code),
                    reason: describe_status(status),
                    retry_after: retry_after(resp.headers()),
                });
            }
            let body = resp.text().await.unwrap_or_default();
            return Err(Failure::Fatal(Error::Http { status: code, body }));
        }

        let headers = resp.headers().clone();
        let raw = match resp.text().await {
            Ok(raw) => raw,
            Err(e) if is_retryable_client_error(&e) => {
                return Err(Failure::retryable(
                    Some(code),
                    format!("reading response body: {e}"),
                ));
            }
            Err(e) => return Err(Failure::Fatal(Error::Client(e))),
        };

        Self::parse(code, headers, &raw).map_err(Failure::Fatal)
    }

    fn parse(status: u16, headers: HeaderMap, raw: &str) -> Result<ApiResponse, Error> {
        let body = if raw.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(raw).map_err(|e| {
                let preview: String = raw.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: raw.to_owned(),
                }
            })?
        };

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

fn describe_status(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {reason}", status.as_u16()),
        None => format!("HTTP {}", status.as_u16()),
    }
}
