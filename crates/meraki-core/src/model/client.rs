// ── Client and signal-quality domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

const KB_PER_MB: f64 = 1024.0;

/// Client connection medium, as used in `recentDeviceConnections[]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ConnectionType {
    Wired,
    Wireless,
}

/// A client seen on a network during the query timespan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkClient {
    pub id: String,
    pub mac: String,
    /// First non-empty of description, user, DHCP hostname, mDNS name.
    pub name: String,
    pub description: Option<String>,
    pub ip: Option<String>,
    pub status: String,
    pub usage_sent_kb: f64,
    pub usage_recv_kb: f64,
    pub last_seen: Option<DateTime<Utc>>,
    pub recent_device_connection: Option<String>,
}

impl NetworkClient {
    pub fn sent_mb(&self) -> f64 {
        self.usage_sent_kb / KB_PER_MB
    }

    pub fn recv_mb(&self) -> f64 {
        self.usage_recv_kb / KB_PER_MB
    }

    pub fn total_mb(&self) -> f64 {
        self.sent_mb() + self.recv_mb()
    }
}

/// Per-client wireless signal quality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSample {
    pub client_id: String,
    pub client_mac: String,
    pub network_id: String,
    pub network_name: String,
    /// dB.
    pub snr: Option<f64>,
    /// dBm.
    pub rssi: Option<f64>,
}
