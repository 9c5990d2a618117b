use thiserror::Error;

/// Top-level error type for the `meraki-api` crate.
///
/// Covers every failure mode across both API surfaces: the direct REST
/// client, its retry policy, and the SDK-style client's call checking.
/// `meraki-core` maps these into its own taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// Retry budget exhausted on connection failures, timeouts, or
    /// retryable server statuses. Carries the last observed status, if any.
    #[error("request failed after {attempts} attempt(s): {reason}")]
    Transport {
        attempts: u32,
        status: Option<u16>,
        reason: String,
    },

    /// Non-retryable HTTP status (4xx other than 429, or other non-success).
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Request could not be built or the HTTP client could not be created.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API key could not be encoded as a header value.
    #[error("Invalid API key: {message}")]
    InvalidApiKey { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── SDK surface ─────────────────────────────────────────────────
    /// The SDK build does not expose the requested operation.
    #[error("SDK has no operation `{0}`")]
    UnknownOperation(String),

    /// A keyword argument was not accepted by the target callable.
    #[error("{callable}() got an unexpected keyword argument '{keyword}'")]
    UnexpectedKeyword { callable: String, keyword: String },

    /// A required keyword or positional argument was not supplied.
    #[error("{callable}() missing required argument '{argument}'")]
    MissingArgument { callable: String, argument: String },

    /// An argument was supplied with a value the callable cannot use.
    #[error("{callable}() argument '{argument}' has invalid value {value:?}")]
    InvalidArgument {
        callable: String,
        argument: String,
        value: String,
    },

    /// The raw session was called with the wrong number of arguments.
    #[error("{callable}() takes {expected} positional argument(s) but {given} were given")]
    ArityMismatch {
        callable: String,
        expected: usize,
        given: usize,
    },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport { status, .. } => *status,
            Self::Client(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the SDK rejected the call shape (keywords or arity).
    pub fn is_call_shape(&self) -> bool {
        matches!(
            self,
            Self::UnknownOperation(_)
                | Self::UnexpectedKeyword { .. }
                | Self::MissingArgument { .. }
                | Self::InvalidArgument { .. }
                | Self::ArityMismatch { .. }
        )
    }
}
