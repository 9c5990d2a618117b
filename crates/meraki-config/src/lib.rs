//! Configuration for meraki-ops.
//!
//! Layered with figment: built-in defaults, then the TOML file in the
//! platform config directory, then `MERAKI_*` environment variables (a
//! `.env` file in the working directory is loaded first). The result is
//! validated and translated into `meraki_core::DashboardConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use meraki_api::{DEFAULT_BASE_URL, SdkManifest};
use meraki_core::{BackendMode, DashboardConfig};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {field} (set {env})")]
    Missing { field: &'static str, env: &'static str },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("cannot load SDK manifest {path}: {reason}")]
    Manifest { path: PathBuf, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Raw settings as merged from every source, before validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// `MERAKI_DASHBOARD_API_KEY`
    pub api_key: Option<String>,
    /// `MERAKI_ORG_ID`
    pub org_id: Option<String>,
    /// `MERAKI_NETWORK_ID`
    pub network_id: Option<String>,
    /// `MERAKI_DASHBOARD_BASE_URL`
    pub base_url: String,
    /// Per-request timeout in seconds (`MERAKI_REQUEST_TIMEOUT`).
    pub timeout: u64,
    /// `MERAKI_MAX_RETRIES`
    pub max_retries: u32,
    /// `MERAKI_MODE`
    pub mode: BackendMode,
    /// JSON manifest pinning an SDK surface (`MERAKI_SDK_MANIFEST`).
    pub sdk_manifest: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            org_id: None,
            network_id: None,
            base_url: DEFAULT_BASE_URL.into(),
            timeout: 30,
            max_retries: 5,
            mode: BackendMode::Rest,
            sdk_manifest: None,
        }
    }
}

impl Settings {
    /// Validate and build the runtime config. Fails on the first missing
    /// required value.
    pub fn into_dashboard_config(self) -> Result<DashboardConfig, ConfigError> {
        let api_key = required(self.api_key, "api_key", "MERAKI_DASHBOARD_API_KEY")?;
        let org_id = required(self.org_id, "org_id", "MERAKI_ORG_ID")?;
        let network_id = required(self.network_id, "network_id", "MERAKI_NETWORK_ID")?;

        let base_url = Url::parse(&self.base_url).map_err(|e| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("{e} ({})", self.base_url),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "base_url".into(),
                reason: format!("unsupported scheme '{}'", base_url.scheme()),
            });
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let manifest = match self.sdk_manifest {
            Some(ref path) => load_manifest(path)?,
            None => SdkManifest::current(),
        };

        Ok(
            DashboardConfig::new(SecretString::from(api_key), base_url, &org_id, &network_id)
                .with_timeout(Duration::from_secs(self.timeout))
                .with_max_retries(self.max_retries)
                .with_mode(self.mode)
                .with_manifest(manifest),
        )
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    env: &'static str,
) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing { field, env })
}

fn load_manifest(path: &Path) -> Result<SdkManifest, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Manifest {
        path: path.to_owned(),
        reason: e.to_string(),
    })?;
    SdkManifest::from_json(&raw).map_err(|e| ConfigError::Manifest {
        path: path.to_owned(),
        reason: e.to_string(),
    })
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "meraki-ops", "meraki-ops").map_or_else(
        || PathBuf::from(".meraki-ops.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load `.env`, then merge defaults, the config file, and the environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!(path = %path.display(), "loaded .env");
    }
    load_settings_from(&config_path())
}

/// Merge defaults, the given TOML file (if present), and the environment.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let settings = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()?;
    Ok(settings)
}

/// `MERAKI_*` variables, renamed onto `Settings` fields.
fn env_provider() -> Env {
    Env::prefixed("MERAKI_").map(|key| {
        let key = key.as_str().to_ascii_lowercase();
        match key.as_str() {
            "dashboard_api_key" => "api_key".into(),
            "dashboard_base_url" => "base_url".into(),
            "request_timeout" => "timeout".into(),
            other => other.to_owned().into(),
        }
    })
}
