// ── API-to-domain conversions ──
//
// Both backends hand back untyped JSON. Each record is decoded into a
// lenient wire struct (every field optional, scalars accepted in any JSON
// shape) and then turned into the canonical `model` type. Missing fields
// get their defaults here and nowhere else.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::CoreError;
use crate::model::{
    Device, DeviceStatus, Network, NetworkClient, Organization, SignalSample, SwitchPort,
};

// ── Scalar helpers ─────────────────────────────────────────────────

/// Render a JSON scalar as text. Empty strings, null, and containers give `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numeric value from a number or a numeric string.
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Usage in KB; absent or non-numeric input counts as zero.
pub fn usage_kb(value: Option<&Value>) -> f64 {
    value.and_then(number).unwrap_or(0.0)
}

/// Parse an RFC 3339 string or epoch seconds.
pub fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| s.trim().parse::<i64>().ok().and_then(epoch)),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(truncate_seconds))
            .and_then(epoch),
        _ => None,
    }
}

fn epoch(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn truncate_seconds(secs: f64) -> i64 {
    secs.trunc() as i64
}

fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn texts(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    }
}

/// First non-empty candidate.
pub fn first_non_empty<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    candidates.into_iter().flatten().find(|s| !s.trim().is_empty())
}

// ── Lenient field decoders ─────────────────────────────────────────

mod lenient {
    use super::{DateTime, Deserialize, Deserializer, Utc, Value};

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(super::scalar_text(&Value::deserialize(d)?))
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(super::number(&Value::deserialize(d)?))
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(value
            .as_u64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok())))
    }

    pub fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        Ok(super::timestamp(&Value::deserialize(d)?))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(super::flag(&Value::deserialize(d)?))
    }

    pub fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(super::texts(&Value::deserialize(d)?))
    }
}

// ── Wire records ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrganization {
    #[serde(default, deserialize_with = "lenient::string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    name: Option<String>,
}

impl From<RawOrganization> for Organization {
    fn from(raw: RawOrganization) -> Self {
        Self {
            id: raw.id.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNetwork {
    #[serde(default, deserialize_with = "lenient::string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    name: Option<String>,
}

impl From<RawNetwork> for Network {
    fn from(raw: RawNetwork) -> Self {
        Self {
            id: raw.id.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
        }
    }
}

/// Inventory and status entries share this shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDevice {
    #[serde(default, deserialize_with = "lenient::string")]
    serial: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    model: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    network_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    claimed_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    mac: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    product_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    last_reported_at: Option<DateTime<Utc>>,
}

impl From<RawDevice> for Device {
    fn from(raw: RawDevice) -> Self {
        Self {
            serial: raw.serial.unwrap_or_default(),
            model: raw.model.unwrap_or_default(),
            network_id: raw.network_id,
            claimed_at: raw.claimed_at,
            name: raw.name,
            mac: raw.mac,
            product_type: raw.product_type,
            status: raw
                .status
                .and_then(|s| s.parse().ok())
                .unwrap_or(DeviceStatus::Unknown),
            last_reported_at: raw.last_reported_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSwitchPort {
    #[serde(default, deserialize_with = "lenient::string")]
    port_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    is_uplink: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    speed: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    duplex: Option<String>,
    #[serde(default)]
    poe: Value,
    #[serde(default, deserialize_with = "lenient::count")]
    client_count: Option<u64>,
    #[serde(default)]
    spanning_tree: Value,
    #[serde(default, deserialize_with = "lenient::strings")]
    errors: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    warnings: Vec<String>,
}

impl From<RawSwitchPort> for SwitchPort {
    fn from(raw: RawSwitchPort) -> Self {
        Self {
            port_id: raw.port_id.unwrap_or_default(),
            status: raw.status.unwrap_or_default(),
            is_uplink: raw.is_uplink,
            speed: raw.speed.unwrap_or_default(),
            duplex: raw.duplex.unwrap_or_default(),
            poe_allocated: raw.poe.get("isAllocated").is_some_and(flag),
            client_count: raw.client_count,
            spanning_tree_statuses: raw
                .spanning_tree
                .get("statuses")
                .map(texts)
                .unwrap_or_default(),
            errors: raw.errors,
            warnings: raw.warnings,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSignalSample {
    #[serde(default)]
    client: Value,
    #[serde(default)]
    network: Value,
    #[serde(default, deserialize_with = "lenient::number")]
    snr: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    rssi: Option<f64>,
}

impl From<RawSignalSample> for SignalSample {
    fn from(raw: RawSignalSample) -> Self {
        let field = |obj: &Value, key: &str| obj.get(key).and_then(scalar_text).unwrap_or_default();
        Self {
            client_id: field(&raw.client, "id"),
            client_mac: field(&raw.client, "mac"),
            network_id: field(&raw.network, "id"),
            network_name: field(&raw.network, "name"),
            snr: raw.snr,
            rssi: raw.rssi,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNetworkClient {
    #[serde(default, deserialize_with = "lenient::string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    mac: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    user: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    dhcp_hostname: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    mdns_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    ip: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    status: Option<String>,
    #[serde(default)]
    usage: Value,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    last_seen: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::string")]
    recent_device_connection: Option<String>,
}

impl From<RawNetworkClient> for NetworkClient {
    fn from(raw: RawNetworkClient) -> Self {
        let name = first_non_empty([
            raw.description.as_deref(),
            raw.user.as_deref(),
            raw.dhcp_hostname.as_deref(),
            raw.mdns_name.as_deref(),
        ])
        .unwrap_or_default()
        .to_owned();

        Self {
            id: raw.id.unwrap_or_default(),
            mac: raw.mac.unwrap_or_default(),
            name,
            description: raw.description,
            ip: raw.ip,
            status: raw.status.unwrap_or_default(),
            usage_sent_kb: usage_kb(raw.usage.get("sent")),
            usage_recv_kb: usage_kb(raw.usage.get("recv")),
            last_seen: raw.last_seen,
            recent_device_connection: raw.recent_device_connection,
        }
    }
}

// ── Collections ────────────────────────────────────────────────────

/// Require a list body from a non-paginated list endpoint.
pub fn list_body(endpoint: &str, body: Value) -> Result<Vec<Value>, CoreError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Null => Err(CoreError::MalformedResponse {
            endpoint: endpoint.to_owned(),
            detail: "expected a list, got an empty body".into(),
        }),
        _ => Err(CoreError::MalformedResponse {
            endpoint: endpoint.to_owned(),
            detail: "expected a list".into(),
        }),
    }
}

/// Normalize list entries; entries that are not objects are skipped.
pub fn records<R, T>(endpoint: &str, items: Vec<Value>) -> Vec<T>
where
    R: DeserializeOwned + Into<T>,
{
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => serde_json::from_value::<R>(Value::Object(map))
                .ok()
                .map(Into::into),
            other => {
                warn!(endpoint, "skipping non-object entry: {other}");
                None
            }
        })
        .collect()
}

/// Normalize a single-object body.
pub fn record<R, T>(endpoint: &str, body: Value) -> Result<T, CoreError>
where
    R: DeserializeOwned + Into<T>,
{
    if !body.is_object() {
        return Err(CoreError::MalformedResponse {
            endpoint: endpoint.to_owned(),
            detail: "expected an object".into(),
        });
    }
    serde_json::from_value::<R>(body)
        .map(Into::into)
        .map_err(|e| CoreError::MalformedResponse {
            endpoint: endpoint.to_owned(),
            detail: e.to_string(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn client(value: Value) -> NetworkClient {
        record::<RawNetworkClient, NetworkClient>("clients", value).unwrap()
    }

    #[test]
    fn usage_converts_kb_to_mb() {
        let c = client(json!({"id": "k1", "usage": {"sent": 2048, "recv": 512}}));
        assert_eq!(c.sent_mb(), 2.0);
        assert_eq!(c.recv_mb(), 0.5);
        assert_eq!(c.total_mb(), 2.5);
    }

    #[test]
    fn missing_or_non_numeric_usage_is_zero() {
        let c = client(json!({"id": "k1", "usage": {"sent": "n/a"}}));
        assert_eq!(c.usage_sent_kb, 0.0);
        assert_eq!(c.usage_recv_kb, 0.0);

        let c = client(json!({"id": "k2", "usage": {"sent": "1024", "recv": null}}));
        assert_eq!(c.sent_mb(), 1.0);
        assert_eq!(c.recv_mb(), 0.0);

        let c = client(json!({"id": "k3"}));
        assert_eq!(c.total_mb(), 0.0);
    }

    #[test]
    fn client_name_precedence() {
        let c = client(json!({"dhcpHostname": "laptop-7", "mdnsName": "Laptop.local"}));
        assert_eq!(c.name, "laptop-7");

        let c = client(json!({"description": "", "user": "alice", "dhcpHostname": "laptop-7"}));
        assert_eq!(c.name, "alice");

        let c = client(json!({"description": "Front desk", "user": "alice"}));
        assert_eq!(c.name, "Front desk");

        let c = client(json!({"mac": "aa:bb:cc:00:11:22"}));
        assert_eq!(c.name, "");
    }

    #[test]
    fn timestamps_accept_rfc3339_and_epoch() {
        let iso = timestamp(&json!("2024-05-01T12:00:00Z")).unwrap();
        let epoch = timestamp(&json!(1_714_564_800)).unwrap();
        assert_eq!(iso, epoch);
        assert_eq!(timestamp(&json!("1714564800")), Some(epoch));
        assert_eq!(timestamp(&json!("yesterday")), None);
        assert_eq!(timestamp(&Value::Null), None);
    }

    #[test]
    fn device_status_defaults_to_unknown() {
        let inventory: Device = record::<RawDevice, Device>(
            "inventory",
            json!({"serial": "Q2XX-1", "model": "MR46", "claimedAt": "2023-01-01T00:00:00Z"}),
        )
        .unwrap();
        assert_eq!(inventory.status, DeviceStatus::Unknown);
        assert_eq!(inventory.network_id, None);
        assert!(inventory.claimed_at.is_some());

        let status: Device =
            record::<RawDevice, Device>("statuses", json!({"serial": "Q2XX-2", "status": "alerting"}))
                .unwrap();
        assert_eq!(status.status, DeviceStatus::Alerting);
    }

    #[test]
    fn switch_port_flattens_nested_fields() {
        let port: SwitchPort = record::<RawSwitchPort, SwitchPort>(
            "ports",
            json!({
                "portId": 1,
                "status": "Connected",
                "isUplink": false,
                "speed": "1 Gbps",
                "duplex": "full",
                "poe": {"isAllocated": true},
                "clientCount": 3,
                "spanningTree": {"statuses": ["Forwarding", "Is edge"]},
                "errors": [],
                "warnings": ["SecurePort authentication in progress"]
            }),
        )
        .unwrap();

        assert_eq!(port.port_id, "1");
        assert!(port.poe_allocated);
        assert_eq!(port.client_count, Some(3));
        assert_eq!(port.spanning_tree_statuses, vec!["Forwarding", "Is edge"]);
        assert_eq!(port.warnings.len(), 1);
    }

    #[test]
    fn signal_sample_reads_nested_identity() {
        let sample: SignalSample = record::<RawSignalSample, SignalSample>(
            "signal",
            json!({
                "client": {"id": "k74272e", "mac": "22:33:44:55:66:77"},
                "network": {"id": "N_24329156", "name": "Main Office"},
                "snr": 31,
                "rssi": -58.5
            }),
        )
        .unwrap();

        assert_eq!(sample.client_id, "k74272e");
        assert_eq!(sample.network_name, "Main Office");
        assert_eq!(sample.snr, Some(31.0));
        assert_eq!(sample.rssi, Some(-58.5));
    }

    #[test]
    fn non_list_body_is_malformed() {
        let err = list_body("/organizations", json!({"errors": ["Invalid API key"]})).unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse { .. }));
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let orgs: Vec<Organization> = records::<RawOrganization, Organization>(
            "/organizations",
            vec![json!({"id": "1", "name": "Acme"}), json!("junk")],
        );
        assert_eq!(orgs.len(), 1);
    }
}
