// ── Runtime dashboard configuration ──
//
// Describes how to reach the dashboard and which backend to use. Built by
// meraki-config (or by tests) and handed in; nothing here reads the
// environment or the disk.

use std::time::Duration;

use meraki_api::SdkManifest;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

/// Which client implementation serves requests.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackendMode {
    /// Direct HTTP client.
    #[default]
    Rest,
    /// SDK-style client behind the version-tolerance shim.
    Sdk,
}

/// Everything needed to open a dashboard session.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api_key: SecretString,
    pub base_url: Url,
    pub org_id: String,
    pub network_id: String,
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub mode: BackendMode,
    /// SDK surface to emulate in `Sdk` mode.
    pub sdk_manifest: SdkManifest,
}

impl DashboardConfig {
    /// Config with the stock timeout, retry budget, and SDK surface.
    pub fn new(api_key: SecretString, base_url: Url, org_id: &str, network_id: &str) -> Self {
        Self {
            api_key,
            base_url,
            org_id: org_id.to_owned(),
            network_id: network_id.to_owned(),
            timeout: Duration::from_secs(30),
            max_retries: 5,
            mode: BackendMode::Rest,
            sdk_manifest: SdkManifest::current(),
        }
    }

    pub fn with_mode(mut self, mode: BackendMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_manifest(mut self, manifest: SdkManifest) -> Self {
        self.sdk_manifest = manifest;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
