//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use meraki_config::ConfigError;
use meraki_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const UNSUPPORTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Missing required setting '{field}'")]
    #[diagnostic(
        code(meraki::missing_setting),
        help(
            "Set {env} in the environment or a .env file,\n\
             or add `{field} = ...` to {path}"
        )
    )]
    MissingSetting {
        field: String,
        env: String,
        path: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(meraki::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(meraki::config))]
    Config(ConfigError),

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the dashboard after {attempts} attempt(s)")]
    #[diagnostic(
        code(meraki::unreachable),
        help(
            "{reason}\n\
             Check connectivity, or raise MERAKI_MAX_RETRIES / MERAKI_REQUEST_TIMEOUT."
        )
    )]
    Unreachable { attempts: u32, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Dashboard rejected the API key (HTTP {status})")]
    #[diagnostic(
        code(meraki::auth_failed),
        help("Verify MERAKI_DASHBOARD_API_KEY and that API access is enabled for the organization.")
    )]
    AuthFailed { status: u16 },

    #[error("Not found (HTTP 404): {body}")]
    #[diagnostic(
        code(meraki::not_found),
        help("Check the organization, network id or serial. Run: meraki-ops orgs")
    )]
    NotFound { body: String },

    #[error("Dashboard returned HTTP {status}")]
    #[diagnostic(code(meraki::api_error), help("{body}"))]
    Api { status: u16, body: String },

    #[error("Unexpected response from {endpoint}")]
    #[diagnostic(code(meraki::malformed), help("{detail}"))]
    Malformed { endpoint: String, detail: String },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("The SDK backend cannot run '{operation}'")]
    #[diagnostic(
        code(meraki::unsupported),
        help("The configured SDK surface has no such operation and no raw session. Retry with --mode rest.")
    )]
    Unsupported { operation: String },

    #[error("SDK call rejected: {message}")]
    #[diagnostic(
        code(meraki::sdk),
        help("Check MERAKI_SDK_MANIFEST, or retry with --mode rest.")
    )]
    Sdk { message: String },

    #[error("Internal error: {0}")]
    #[diagnostic(code(meraki::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not serialize output: {0}")]
    #[diagnostic(code(meraki::serialize))]
    Serialize(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingSetting { .. } | Self::Config(_) => exit_code::CONFIG,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Unreachable { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Unsupported { .. } | Self::Sdk { .. } => exit_code::UNSUPPORTED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError ───────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing { field, env } => Self::MissingSetting {
                field: field.into(),
                env: env.into(),
                path: meraki_config::config_path().display().to_string(),
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── CoreError → CliError ─────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Transport {
                attempts, reason, ..
            } => Self::Unreachable { attempts, reason },
            CoreError::Http {
                status: status @ (401 | 403),
                ..
            } => Self::AuthFailed { status },
            CoreError::Http { status: 404, body } => Self::NotFound { body },
            CoreError::Http { status, body } => Self::Api { status, body },
            CoreError::MalformedResponse { endpoint, detail } => {
                Self::Malformed { endpoint, detail }
            }
            CoreError::UnsupportedBackendOperation { operation } => {
                Self::Unsupported { operation }
            }
            CoreError::Sdk { message } => Self::Sdk { message },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}
