// ── Backend abstraction ──
//
// One trait, two implementations (`RestProvider`, `SdkProvider`). Query
// types and their parameter encodings live here so both backends send the
// same filters for the same logical request.

use async_trait::async_trait;
use meraki_api::Params;

use crate::config::BackendMode;
use crate::error::CoreError;
use crate::model::{
    ConnectionType, Device, Network, NetworkClient, Organization, ProductType, SignalSample,
    SwitchPort,
};

/// Page ceiling for the signal-quality sweep.
pub const SIGNAL_QUALITY_MAX_PAGES: usize = 10;
/// Page ceiling for the network-clients sweep.
pub const NETWORK_CLIENTS_MAX_PAGES: usize = 20;

pub const DEFAULT_TIMESPAN: u32 = 86_400;
pub const DEFAULT_PER_PAGE: u32 = 1000;

// ── Queries ─────────────────────────────────────────────────────────

/// Filters for per-client wireless signal quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalQualityQuery {
    /// Seconds.
    pub timespan: u32,
    pub network_id: Option<String>,
    pub serials: Vec<String>,
    pub per_page: u32,
}

impl Default for SignalQualityQuery {
    fn default() -> Self {
        Self {
            timespan: DEFAULT_TIMESPAN,
            network_id: None,
            serials: Vec::new(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl SignalQualityQuery {
    pub fn params(&self) -> Params {
        Params::new()
            .scalar("timespan", self.timespan)
            .scalar("perPage", self.per_page)
            .list("networkIds", self.network_id.iter().filter(|n| !n.is_empty()).cloned())
            .list("serials", self.serials.iter().cloned())
    }
}

/// Filters for the network client listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientsQuery {
    /// Seconds.
    pub timespan: u32,
    pub per_page: u32,
    /// Empty means any connection type.
    pub connection_types: Vec<ConnectionType>,
}

impl Default for ClientsQuery {
    fn default() -> Self {
        Self {
            timespan: DEFAULT_TIMESPAN,
            per_page: DEFAULT_PER_PAGE,
            connection_types: Vec::new(),
        }
    }
}

impl ClientsQuery {
    pub fn params(&self) -> Params {
        Params::new()
            .scalar("timespan", self.timespan)
            .scalar("perPage", self.per_page)
            .list(
                "recentDeviceConnections",
                self.connection_types.iter().map(ToString::to_string),
            )
    }
}

/// Optional time window for switch port statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortWindow {
    pub t0: Option<String>,
    pub t1: Option<String>,
}

impl PortWindow {
    pub fn params(&self) -> Params {
        Params::new()
            .optional("t0", self.t0.as_deref())
            .optional("t1", self.t1.as_deref())
    }
}

/// `networkIds[]` + `productTypes[]` filter for device statuses.
pub fn statuses_params(network_id: &str, product_type: ProductType) -> Params {
    Params::new()
        .list("networkIds", [network_id].into_iter().filter(|n| !n.is_empty()))
        .list("productTypes", [product_type.to_string()])
}

// ── Provider trait ──────────────────────────────────────────────────

/// Read access to the dashboard through one client implementation.
///
/// Implementations return normalized records; the same logical request
/// yields field-compatible results from either backend.
#[async_trait]
pub trait DashboardProvider: Send + Sync {
    fn mode(&self) -> BackendMode;

    async fn organizations(&self) -> Result<Vec<Organization>, CoreError>;

    async fn inventory(&self, org_id: &str) -> Result<Vec<Device>, CoreError>;

    async fn device_statuses(
        &self,
        org_id: &str,
        network_id: &str,
        product_type: ProductType,
    ) -> Result<Vec<Device>, CoreError>;

    async fn device(&self, serial: &str) -> Result<Device, CoreError>;

    async fn switch_ports(
        &self,
        serial: &str,
        window: &PortWindow,
    ) -> Result<Vec<SwitchPort>, CoreError>;

    async fn network(&self, network_id: &str) -> Result<Network, CoreError>;

    async fn signal_quality(
        &self,
        org_id: &str,
        query: &SignalQualityQuery,
    ) -> Result<Vec<SignalSample>, CoreError>;

    async fn network_clients(
        &self,
        network_id: &str,
        query: &ClientsQuery,
    ) -> Result<Vec<NetworkClient>, CoreError>;
}
