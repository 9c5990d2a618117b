// ── SDK backend ──
//
// Resource accessors over the SDK-style client. Every request goes
// through the shim, which picks the generated operation or the raw
// session. Normalization is shared with the REST backend.

use async_trait::async_trait;
use meraki_api::sdk::operations::{
    GET_DEVICE, GET_DEVICE_SWITCH_PORTS_STATUSES, GET_NETWORK, GET_NETWORK_CLIENTS,
    GET_ORGANIZATION_DEVICES_STATUSES, GET_ORGANIZATION_INVENTORY_DEVICES,
    GET_ORGANIZATION_WIRELESS_DEVICES_SIGNAL_QUALITY_BY_CLIENT, GET_ORGANIZATIONS,
};
use meraki_api::Params;
use serde_json::Value;

use super::shim::{SdkShim, ShimRequest};
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

/// SDK-backed implementation of [`DashboardProvider`].
#[derive(Debug, Clone)]
pub struct SdkProvider {
    shim: SdkShim,
}

impl SdkProvider {
    pub fn new(config: &DashboardConfig) -> Result<Self, CoreError> {
        Ok(Self {
            shim: SdkShim::connect(config)?,
        })
    }

    pub fn from_shim(shim: SdkShim) -> Self {
        Self { shim }
    }

    pub fn shim(&self) -> &SdkShim {
        &self.shim
    }

    async fn list(&self, request: ShimRequest<'_>) -> Result<Vec<Value>, CoreError> {
        let operation = request.operation;
        let body = self.shim.fetch(request).await?;
        convert::list_body(operation, body)
    }
}

#[async_trait]
impl DashboardProvider for SdkProvider {
    fn mode(&self) -> BackendMode {
        BackendMode::Sdk
    }

    async fn organizations(&self) -> Result<Vec<Organization>, CoreError> {
        let items = self
            .list(ShimRequest::list(GET_ORGANIZATIONS, &[], Params::new()))
            .await?;
        Ok(convert::records::<RawOrganization, _>(GET_ORGANIZATIONS, items))
    }

    async fn inventory(&self, org_id: &str) -> Result<Vec<Device>, CoreError> {
        let items = self
            .list(ShimRequest::list(
                GET_ORGANIZATION_INVENTORY_DEVICES,
                &[org_id],
                Params::new(),
            ))
            .await?;
        Ok(convert::records::<RawDevice, _>(
            GET_ORGANIZATION_INVENTORY_DEVICES,
            items,
        ))
    }

    async fn device_statuses(
        &self,
        org_id: &str,
        network_id: &str,
        product_type: ProductType,
    ) -> Result<Vec<Device>, CoreError> {
        let items = self
            .list(ShimRequest::list(
                GET_ORGANIZATION_DEVICES_STATUSES,
                &[org_id],
                statuses_params(network_id, product_type),
            ))
            .await?;
        Ok(convert::records::<RawDevice, _>(
            GET_ORGANIZATION_DEVICES_STATUSES,
            items,
        ))
    }

    async fn device(&self, serial: &str) -> Result<Device, CoreError> {
        let body = self
            .shim
            .fetch(ShimRequest::object(GET_DEVICE, &[serial]))
            .await?;
        convert::record::<RawDevice, _>(GET_DEVICE, body)
    }

    async fn switch_ports(
        &self,
        serial: &str,
        window: &PortWindow,
    ) -> Result<Vec<SwitchPort>, CoreError> {
        let items = self
            .list(ShimRequest::list(
                GET_DEVICE_SWITCH_PORTS_STATUSES,
                &[serial],
                window.params(),
            ))
            .await?;
        Ok(convert::records::<RawSwitchPort, _>(
            GET_DEVICE_SWITCH_PORTS_STATUSES,
            items,
        ))
    }

    async fn network(&self, network_id: &str) -> Result<Network, CoreError> {
        let body = self
            .shim
            .fetch(ShimRequest::object(GET_NETWORK, &[network_id]))
            .await?;
        convert::record::<RawNetwork, _>(GET_NETWORK, body)
    }

    async fn signal_quality(
        &self,
        org_id: &str,
        query: &SignalQualityQuery,
    ) -> Result<Vec<SignalSample>, CoreError> {
        let op = GET_ORGANIZATION_WIRELESS_DEVICES_SIGNAL_QUALITY_BY_CLIENT;
        let items = self
            .list(ShimRequest::list(op, &[org_id], query.params()).pages(SIGNAL_QUALITY_MAX_PAGES))
            .await?;
        Ok(convert::records::<RawSignalSample, _>(op, items))
    }

    async fn network_clients(
        &self,
        network_id: &str,
        query: &ClientsQuery,
    ) -> Result<Vec<NetworkClient>, CoreError> {
        let items = self
            .list(
                ShimRequest::list(GET_NETWORK_CLIENTS, &[network_id], query.params())
                    .pages(NETWORK_CLIENTS_MAX_PAGES),
            )
            .await?;
        Ok(convert::records::<RawNetworkClient, _>(
            GET_NETWORK_CLIENTS,
            items,
        ))
    }
}
