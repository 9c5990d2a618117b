// ── REST backend ──
//
// Resource accessors over the direct HTTP client. List endpoints without
// pagination are single GETs; signal quality and network clients walk the
// `Link` cursor up to their page ceilings.

use async_trait::async_trait;
use meraki_api::{Params, RestClient, RetryPolicy, StopReason, TransportConfig, paginate};
use serde_json::Value;
use tracing::debug;

use crate::config::{BackendMode, DashboardConfig};
use crate::convert::{
    self, RawDevice, RawNetwork, RawNetworkClient, RawOrganization, RawSignalSample,
    RawSwitchPort,
};
use crate::error::CoreError;
use crate::model::{
    Device, Network, NetworkClient, Organization, ProductType, SignalSample, SwitchPort,
};
use crate::provider::{
    ClientsQuery, DashboardProvider, NETWORK_CLIENTS_MAX_PAGES, PortWindow,
    SIGNAL_QUALITY_MAX_PAGES, SignalQualityQuery, statuses_params,
};

/// Direct-HTTP implementation of [`DashboardProvider`].
#[derive(Debug, Clone)]
pub struct RestProvider {
    client: RestClient,
}

impl RestProvider {
    pub fn new(config: &DashboardConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            retry: RetryPolicy::with_max_retries(config.max_retries),
        };
        let client = RestClient::new(config.base_url.as_str(), &config.api_key, &transport)?;
        Ok(Self { client })
    }

    pub fn from_client(client: RestClient) -> Self {
        Self { client }
    }

    async fn list(&self, path: &str, params: &Params) -> Result<Vec<Value>, CoreError> {
        let body = self.client.get(path, params).await?;
        convert::list_body(path, body)
    }

    async fn sweep(
        &self,
        path: &str,
        params: &Params,
        max_pages: usize,
    ) -> Result<Vec<Value>, CoreError> {
        let client = &self.client;
        let sweep = paginate(max_pages, |cursor| async move {
            client.get_page(path, params, cursor.as_deref()).await
        })
        .await?;

        if sweep.stop == StopReason::Ceiling {
            debug!(path, pages = sweep.pages, "page ceiling reached; results truncated");
        }
        Ok(sweep.items)
    }
}

#[async_trait]
impl DashboardProvider for RestProvider {
    fn mode(&self) -> BackendMode {
        BackendMode::Rest
    }

    async fn organizations(&self) -> Result<Vec<Organization>, CoreError> {
        let path = "/organizations";
        let items = self.list(path, &Params::new()).await?;
        Ok(convert::records::<RawOrganization, _>(path, items))
    }

    async fn inventory(&self, org_id: &str) -> Result<Vec<Device>, CoreError> {
        let path = format!("/organizations/{org_id}/inventoryDevices");
        let items = self.list(&path, &Params::new()).await?;
        Ok(convert::records::<RawDevice, _>(&path, items))
    }

    async fn device_statuses(
        &self,
        org_id: &str,
        network_id: &str,
        product_type: ProductType,
    ) -> Result<Vec<Device>, CoreError> {
        let path = format!("/organizations/{org_id}/devices/statuses");
        let items = self
            .list(&path, &statuses_params(network_id, product_type))
            .await?;
        Ok(convert::records::<RawDevice, _>(&path, items))
    }

    async fn device(&self, serial: &str) -> Result<Device, CoreError> {
        let path = format!("/devices/{serial}");
        let body = self.client.get(&path, &Params::new()).await?;
        convert::record::<RawDevice, _>(&path, body)
    }

    async fn switch_ports(
        &self,
        serial: &str,
        window: &PortWindow,
    ) -> Result<Vec<SwitchPort>, CoreError> {
        let path = format!("/devices/{serial}/switch/ports/statuses");
        let items = self.list(&path, &window.params()).await?;
        Ok(convert::records::<RawSwitchPort, _>(&path, items))
    }

    async fn network(&self, network_id: &str) -> Result<Network, CoreError> {
        let path = format!("/networks/{network_id}");
        let body = self.client.get(&path, &Params::new()).await?;
        convert::record::<RawNetwork, _>(&path, body)
    }

    async fn signal_quality(
        &self,
        org_id: &str,
        query: &SignalQualityQuery,
    ) -> Result<Vec<SignalSample>, CoreError> {
        let path = format!("/organizations/{org_id}/wireless/devices/signalQuality/byClient");
        let items = self
            .sweep(&path, &query.params(), SIGNAL_QUALITY_MAX_PAGES)
            .await?;
        Ok(convert::records::<RawSignalSample, _>(&path, items))
    }

    async fn network_clients(
        &self,
        network_id: &str,
        query: &ClientsQuery,
    ) -> Result<Vec<NetworkClient>, CoreError> {
        let path = format!("/networks/{network_id}/clients");
        let items = self
            .sweep(&path, &query.params(), NETWORK_CLIENTS_MAX_PAGES)
            .await?;
        Ok(convert::records::<RawNetworkClient, _>(&path, items))
    }
}
