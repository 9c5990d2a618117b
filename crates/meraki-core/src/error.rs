// ── Core error types ──
//
// User-facing errors from meraki-core. Both backends report failures
// through this one taxonomy, so callers never branch on which client
// produced them. `From<meraki_api::Error>` does the translation.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Transport errors ─────────────────────────────────────────────
    /// Connection failures, timeouts, or retryable statuses that outlasted
    /// the retry budget.
    #[error("Dashboard unreachable after {attempts} attempt(s): {reason}")]
    Transport {
        attempts: u32,
        status: Option<u16>,
        reason: String,
    },

    /// Non-retryable HTTP failure.
    #[error("Dashboard returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Malformed response from {endpoint}: {detail}")]
    MalformedResponse { endpoint: String, detail: String },

    // ── Backend errors ───────────────────────────────────────────────
    /// The SDK build has neither the operation nor a usable raw session.
    #[error("SDK backend cannot perform {operation}: no generated method and no raw session")]
    UnsupportedBackendOperation { operation: String },

    /// The SDK client rejected the call shape.
    #[error("SDK call rejected: {message}")]
    Sdk { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<meraki_api::Error> for CoreError {
    fn from(err: meraki_api::Error) -> Self {
        match err {
            meraki_api::Error::Transport {
                attempts,
                status,
                reason,
            } => CoreError::Transport {
                attempts,
                status,
                reason,
            },
            meraki_api::Error::Http { status, body } => CoreError::Http { status, body },
            meraki_api::Error::Client(e) => CoreError::Transport {
                attempts: 1,
                status: e.status().map(|s| s.as_u16()),
                reason: e.to_string(),
            },
            meraki_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid base URL: {e}"),
            },
            meraki_api::Error::InvalidApiKey { message } => CoreError::Config { message },
            meraki_api::Error::Deserialization { message, .. } => CoreError::MalformedResponse {
                endpoint: "response body".into(),
                detail: message,
            },
            err @ (meraki_api::Error::UnknownOperation(_)
            | meraki_api::Error::UnexpectedKeyword { .. }
            | meraki_api::Error::MissingArgument { .. }
            | meraki_api::Error::InvalidArgument { .. }
            | meraki_api::Error::ArityMismatch { .. }) => CoreError::Sdk {
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_keep_attempts_and_status() {
        let err: CoreError = meraki_api::Error::Transport {
            attempts: 6,
            status: Some(503),
            reason: "HTTP 503 Service Unavailable".into(),
        }
        .into();

        assert!(matches!(err, CoreError::Transport { attempts: 6, .. }));
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn call_shape_errors_become_sdk_errors() {
        let err: CoreError = meraki_api::Error::UnexpectedKeyword {
            callable: "getNetworkClients".into(),
            keyword: "total_pages".into(),
        }
        .into();

        match err {
            CoreError::Sdk { message } => assert!(message.contains("total_pages")),
            other => panic!("expected Sdk error, got {other:?}"),
        }
    }

    #[test]
    fn not_found_is_detected() {
        let err: CoreError = meraki_api::Error::Http {
            status: 404,
            body: String::new(),
        }
        .into();
        assert!(err.is_not_found());
    }
}
