// ── Device domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Device product family, as used in `productTypes[]` filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProductType {
    Switch,
    Wireless,
}

/// Reported device status.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeviceStatus {
    Online,
    Offline,
    Alerting,
    Dormant,
    #[default]
    Unknown,
}

impl DeviceStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }
}

/// An inventory or status entry for one device. Identity is `serial`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub serial: String,
    pub model: String,
    /// Absent for unclaimed inventory.
    pub network_id: Option<String>,
    pub claimed_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub mac: Option<String>,
    pub product_type: Option<String>,
    /// `Unknown` for inventory entries, which carry no status.
    pub status: DeviceStatus,
    pub last_reported_at: Option<DateTime<Utc>>,
}

impl Device {
    /// Display name: configured name, else MAC, else empty.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.mac.as_deref().filter(|m| !m.is_empty()))
            .unwrap_or("")
    }
}

/// Status of one switch port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchPort {
    pub port_id: String,
    pub status: String,
    pub is_uplink: bool,
    pub speed: String,
    pub duplex: String,
    pub poe_allocated: bool,
    pub client_count: Option<u64>,
    pub spanning_tree_statuses: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// The ports of one switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchPorts {
    pub serial: String,
    pub name: String,
    pub ports: Vec<SwitchPort>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(DeviceStatus::from_str("Online").unwrap(), DeviceStatus::Online);
        assert_eq!(DeviceStatus::from_str("dormant").unwrap(), DeviceStatus::Dormant);
        assert!(DeviceStatus::from_str("rebooting").is_err());
    }

    #[test]
    fn label_prefers_name_then_mac() {
        let mut device = Device {
            serial: "Q2XX-AAAA-0001".into(),
            model: "MS120-8".into(),
            network_id: None,
            claimed_at: None,
            name: Some(String::new()),
            mac: Some("e0:55:3d:00:00:01".into()),
            product_type: None,
            status: DeviceStatus::Unknown,
            last_reported_at: None,
        };
        assert_eq!(device.label(), "e0:55:3d:00:00:01");

        device.name = Some("core-sw".into());
        assert_eq!(device.label(), "core-sw");

        device.name = None;
        device.mac = None;
        assert_eq!(device.label(), "");
    }
}
