// ── Dashboard facade ──
//
// The single entry point for consumers. Selects one backend at
// construction and exposes every read operation, plus the composite
// lookups the CLI needs (org maps, ports across a network, name
// resolution).

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::{BackendMode, DashboardConfig};
use crate::error::CoreError;
use crate::model::{
    Device, NetworkClient, Organization, ProductType, SignalSample, SwitchPort, SwitchPorts,
};
use crate::provider::{ClientsQuery, DashboardProvider, PortWindow, SignalQualityQuery};
use crate::rest::RestProvider;
use crate::sdk::SdkProvider;

/// Read-only dashboard access through the configured backend.
pub struct Dashboard {
    provider: Box<dyn DashboardProvider>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("mode", &self.provider.mode())
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Build the backend selected by `config.mode`.
    pub fn connect(config: &DashboardConfig) -> Result<Self, CoreError> {
        let provider: Box<dyn DashboardProvider> = match config.mode {
            BackendMode::Rest => Box::new(RestProvider::new(config)?),
            BackendMode::Sdk => Box::new(SdkProvider::new(config)?),
        };
        info!(mode = %config.mode, base_url = %config.base_url, "dashboard backend selected");
        Ok(Self { provider })
    }

    /// Use an explicit provider.
    pub fn from_provider(provider: Box<dyn DashboardProvider>) -> Self {
        Self { provider }
    }

    pub fn mode(&self) -> BackendMode {
        self.provider.mode()
    }

    // ── Organizations ────────────────────────────────────────────────

    pub async fn organizations(&self) -> Result<Vec<Organization>, CoreError> {
        self.provider.organizations().await
    }

    /// Name → id. On duplicate names the later entry wins.
    pub async fn org_name_to_id(&self) -> Result<BTreeMap<String, String>, CoreError> {
        let orgs = self.organizations().await?;
        Ok(orgs.into_iter().map(|o| (o.name, o.id)).collect())
    }

    /// Id → name.
    pub async fn org_id_to_name(&self) -> Result<BTreeMap<String, String>, CoreError> {
        let orgs = self.organizations().await?;
        Ok(orgs.into_iter().map(|o| (o.id, o.name)).collect())
    }

    // ── Devices ──────────────────────────────────────────────────────

    pub async fn inventory(&self, org_id: &str) -> Result<Vec<Device>, CoreError> {
        self.provider.inventory(org_id).await
    }

    pub async fn switch_health(
        &self,
        org_id: &str,
        network_id: &str,
    ) -> Result<Vec<Device>, CoreError> {
        self.provider
            .device_statuses(org_id, network_id, ProductType::Switch)
            .await
    }

    pub async fn ap_health(&self, org_id: &str, network_id: &str) -> Result<Vec<Device>, CoreError> {
        self.provider
            .device_statuses(org_id, network_id, ProductType::Wireless)
            .await
    }

    pub async fn device(&self, serial: &str) -> Result<Device, CoreError> {
        self.provider.device(serial).await
    }

    // ── Switch ports ─────────────────────────────────────────────────

    pub async fn switch_ports(
        &self,
        serial: &str,
        window: &PortWindow,
    ) -> Result<Vec<SwitchPort>, CoreError> {
        self.provider.switch_ports(serial, window).await
    }

    /// Ports of one switch, labelled with its name (or MAC, or nothing).
    pub async fn switch_ports_for_serial(
        &self,
        serial: &str,
        window: &PortWindow,
    ) -> Result<SwitchPorts, CoreError> {
        let device = self.provider.device(serial).await?;
        let ports = self.provider.switch_ports(serial, window).await?;
        Ok(SwitchPorts {
            serial: serial.to_owned(),
            name: device.label().to_owned(),
            ports,
        })
    }

    /// Ports of every switch in a network, one switch at a time.
    ///
    /// Switches reported without a serial are skipped.
    pub async fn switch_ports_for_network(
        &self,
        org_id: &str,
        network_id: &str,
        window: &PortWindow,
    ) -> Result<Vec<SwitchPorts>, CoreError> {
        let switches = self.switch_health(org_id, network_id).await?;
        let mut out = Vec::with_capacity(switches.len());

        for switch in switches.into_iter().filter(|s| !s.serial.is_empty()) {
            let ports = self.provider.switch_ports(&switch.serial, window).await?;
            debug!(serial = %switch.serial, ports = ports.len(), "switch ports fetched");
            out.push(SwitchPorts {
                name: switch.name.unwrap_or_default(),
                serial: switch.serial,
                ports,
            });
        }
        Ok(out)
    }

    // ── Wireless / clients ───────────────────────────────────────────

    pub async fn wifi_signal(
        &self,
        org_id: &str,
        query: &SignalQualityQuery,
    ) -> Result<Vec<SignalSample>, CoreError> {
        self.provider.signal_quality(org_id, query).await
    }

    pub async fn network_clients(
        &self,
        network_id: &str,
        query: &ClientsQuery,
    ) -> Result<Vec<NetworkClient>, CoreError> {
        self.provider.network_clients(network_id, query).await
    }

    // ── Name resolution (non-fatal) ──────────────────────────────────

    /// Organization name, or empty when it cannot be resolved.
    pub async fn resolve_org_name(&self, org_id: &str) -> String {
        match self.org_id_to_name().await {
            Ok(mut names) => names.remove(org_id).unwrap_or_default(),
            Err(e) => {
                debug!(org_id, error = %e, "organization name not resolved");
                String::new()
            }
        }
    }

    /// Network name, or empty when it cannot be resolved.
    pub async fn resolve_network_name(&self, network_id: &str) -> String {
        match self.provider.network(network_id).await {
            Ok(network) => network.name,
            Err(e) => {
                debug!(network_id, error = %e, "network name not resolved");
                String::new()
            }
        }
    }
}
