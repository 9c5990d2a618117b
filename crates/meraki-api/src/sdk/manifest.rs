// SDK surface description.
//
// Different SDK releases accept different constructor keywords, expose a
// different set of generated operations, and shape the raw session `get`
// differently (`get(url, params)` vs `get(metadata, url, params)`). The
// manifest records what one build exposes so calls can be checked against it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::operations::{
    GET_DEVICE, GET_DEVICE_SWITCH_PORTS_STATUSES, GET_NETWORK, GET_NETWORK_CLIENTS,
    GET_ORGANIZATION_DEVICES_STATUSES, GET_ORGANIZATION_INVENTORY_DEVICES,
    GET_ORGANIZATION_WIRELESS_DEVICES_SIGNAL_QUALITY_BY_CLIENT, GET_ORGANIZATIONS,
};

/// Keywords accepted by paginated generated methods on every release.
const PAGINATION_KWARGS: &[&str] = &["total_pages", "perPage", "startingAfter", "endingBefore"];

/// What a particular SDK build exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkManifest {
    /// Free-form release label, for logs only.
    #[serde(default)]
    pub release: String,

    /// Keyword names accepted by the client constructor.
    pub constructor: BTreeSet<String>,

    /// Parameter names of the raw session `get`, or `None` when the
    /// build has no usable raw session.
    #[serde(default)]
    pub session_get: Option<Vec<String>>,

    /// Generated operations and the keyword names each one accepts.
    #[serde(default)]
    pub operations: BTreeMap<String, BTreeSet<String>>,
}

impl SdkManifest {
    /// The full surface of the current release.
    pub fn current() -> Self {
        let mut operations = BTreeMap::new();
        operations.insert(GET_ORGANIZATIONS.to_owned(), names(&[]));
        operations.insert(
            GET_ORGANIZATION_INVENTORY_DEVICES.to_owned(),
            names_with_pages(&[
                "usedState", "search", "macs", "networkIds", "serials", "models",
                "orderNumbers", "tags", "tagsFilterType", "productTypes",
            ]),
        );
        operations.insert(
            GET_ORGANIZATION_DEVICES_STATUSES.to_owned(),
            names_with_pages(&[
                "networkIds", "serials", "statuses", "productTypes", "models", "tags",
                "tagsFilterType",
            ]),
        );
        operations.insert(GET_DEVICE.to_owned(), names(&[]));
        operations.insert(
            GET_DEVICE_SWITCH_PORTS_STATUSES.to_owned(),
            names(&["t0", "timespan", "t1"]),
        );
        operations.insert(GET_NETWORK.to_owned(), names(&[]));
        operations.insert(
            GET_NETWORK_CLIENTS.to_owned(),
            names_with_pages(&[
                "t0", "timespan", "statuses", "ip", "ip6", "ip6Local", "mac", "os",
                "pskGroup", "description", "vlan", "namedVlan", "recentDeviceConnections",
            ]),
        );
        operations.insert(
            GET_ORGANIZATION_WIRELESS_DEVICES_SIGNAL_QUALITY_BY_CLIENT.to_owned(),
            names_with_pages(&["networkIds", "serials", "clientIds", "t0", "t1", "timespan"]),
        );

        Self {
            release: "current".into(),
            constructor: names(&[
                "api_key",
                "base_url",
                "single_request_timeout",
                "maximum_retries",
                "wait_on_rate_limit",
                "suppress_logging",
                "caller",
            ]),
            session_get: Some(vec!["metadata".into(), "url".into(), "params".into()]),
            operations,
        }
    }

    /// Parse a manifest from JSON.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn accepts_constructor(&self, keyword: &str) -> bool {
        self.constructor.contains(keyword)
    }

    /// Accepted keywords of a generated operation, if the build has it.
    pub fn operation(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.operations.get(id)
    }

    /// Raw session `get` parameter names, if a raw session exists.
    pub fn session_get(&self) -> Option<&[String]> {
        self.session_get.as_deref().filter(|p| !p.is_empty())
    }

    // ── Builders (pin an older surface) ──────────────────────────────

    pub fn with_release(mut self, release: &str) -> Self {
        self.release = release.to_owned();
        self
    }

    pub fn with_constructor(mut self, keywords: &[&str]) -> Self {
        self.constructor = names(keywords);
        self
    }

    pub fn with_session_get(mut self, params: Option<&[&str]>) -> Self {
        self.session_get = params.map(|p| p.iter().map(|s| (*s).to_owned()).collect());
        self
    }

    pub fn without_operation(mut self, id: &str) -> Self {
        self.operations.remove(id);
        self
    }

    pub fn with_operation(mut self, id: &str, keywords: &[&str]) -> Self {
        self.operations.insert(id.to_owned(), names(keywords));
        self
    }
}

impl Default for SdkManifest {
    fn default() -> Self {
        Self::current()
    }
}

fn names(keywords: &[&str]) -> BTreeSet<String> {
    keywords.iter().map(|k| (*k).to_owned()).collect()
}

fn names_with_pages(keywords: &[&str]) -> BTreeSet<String> {
    let mut set = names(keywords);
    set.extend(PAGINATION_KWARGS.iter().map(|k| (*k).to_owned()));
    set
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn current_exposes_every_catalogued_operation() {
        let manifest = SdkManifest::current();
        for op in super::super::operations::CATALOGUE {
            assert!(manifest.operation(op.id).is_some(), "{}", op.id);
        }
    }

    #[test]
    fn parses_pinned_manifest() {
        let raw = r#"{
            "release": "1.12",
            "constructor": ["api_key", "base_url", "timeout", "maximum_retries"],
            "sessionGet": ["url", "params"],
            "operations": { "getOrganizations": [] }
        }"#;

        let manifest = SdkManifest::from_json(raw).unwrap();
        assert_eq!(manifest.release, "1.12");
        assert!(manifest.accepts_constructor("timeout"));
        assert_eq!(manifest.session_get().unwrap().len(), 2);
        assert!(manifest.operation("getNetworkClients").is_none());
    }

    #[test]
    fn empty_session_signature_means_no_session() {
        let manifest = SdkManifest::current().with_session_get(Some(&[]));
        assert!(manifest.session_get().is_none());
    }
}
