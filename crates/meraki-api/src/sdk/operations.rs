// Operation catalogue for the SDK-style surface.
//
// Each entry names a dashboard operation (`operationId`), its path template,
// the positional path parameters, its tags, and whether the SDK can walk
// its pages. A manifest decides which of these a given build exposes.

/// A catalogued dashboard operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDef {
    pub id: &'static str,
    pub path: &'static str,
    pub path_params: &'static [&'static str],
    pub tags: &'static [&'static str],
    pub paginated: bool,
}

impl OperationDef {
    /// Substitute positional arguments into the path template.
    pub fn render_path(&self, args: &[&str]) -> String {
        self.path_params
            .iter()
            .zip(args)
            .fold(self.path.to_owned(), |path, (name, value)| {
                path.replace(&format!("{{{name}}}"), value)
            })
    }
}

pub const GET_ORGANIZATIONS: &str = "getOrganizations";
pub const GET_ORGANIZATION_INVENTORY_DEVICES: &str = "getOrganizationInventoryDevices";
pub const GET_ORGANIZATION_DEVICES_STATUSES: &str = "getOrganizationDevicesStatuses";
pub const GET_DEVICE: &str = "getDevice";
pub const GET_DEVICE_SWITCH_PORTS_STATUSES: &str = "getDeviceSwitchPortsStatuses";
pub const GET_NETWORK: &str = "getNetwork";
pub const GET_NETWORK_CLIENTS: &str = "getNetworkClients";
pub const GET_ORGANIZATION_WIRELESS_DEVICES_SIGNAL_QUALITY_BY_CLIENT: &str =
    "getOrganizationWirelessDevicesSignalQualityByClient";

pub const CATALOGUE: &[OperationDef] = &[
    OperationDef {
        id: GET_ORGANIZATIONS,
        path: "/organizations",
        path_params: &[],
        tags: &["organizations", "configure"],
        paginated: false,
    },
    OperationDef {
        id: GET_ORGANIZATION_INVENTORY_DEVICES,
        path: "/organizations/{organizationId}/inventoryDevices",
        path_params: &["organizationId"],
        tags: &["organizations", "configure", "inventoryDevices"],
        paginated: true,
    },
    OperationDef {
        id: GET_ORGANIZATION_DEVICES_STATUSES,
        path: "/organizations/{organizationId}/devices/statuses",
        path_params: &["organizationId"],
        tags: &["organizations", "monitor", "devices", "statuses"],
        paginated: true,
    },
    OperationDef {
        id: GET_DEVICE,
        path: "/devices/{serial}",
        path_params: &["serial"],
        tags: &["devices", "configure"],
        paginated: false,
    },
    OperationDef {
        id: GET_DEVICE_SWITCH_PORTS_STATUSES,
        path: "/devices/{serial}/switch/ports/statuses",
        path_params: &["serial"],
        tags: &["switch", "monitor", "ports", "statuses"],
        paginated: false,
    },
    OperationDef {
        id: GET_NETWORK,
        path: "/networks/{networkId}",
        path_params: &["networkId"],
        tags: &["networks", "configure"],
        paginated: false,
    },
    OperationDef {
        id: GET_NETWORK_CLIENTS,
        path: "/networks/{networkId}/clients",
        path_params: &["networkId"],
        tags: &["networks", "monitor", "clients"],
        paginated: true,
    },
    OperationDef {
        id: GET_ORGANIZATION_WIRELESS_DEVICES_SIGNAL_QUALITY_BY_CLIENT,
        path: "/organizations/{organizationId}/wireless/devices/signalQuality/byClient",
        path_params: &["organizationId"],
        tags: &["wireless", "monitor", "devices", "signalQuality", "byClient"],
        paginated: true,
    },
];

/// Look up a catalogued operation by id.
pub fn find(id: &str) -> Option<&'static OperationDef> {
    CATALOGUE.iter().find(|op| op.id == id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn renders_path_parameters() {
        let op = find(GET_NETWORK_CLIENTS).unwrap();
        assert_eq!(op.render_path(&["N_123"]), "/networks/N_123/clients");
    }

    #[test]
    fn unknown_operation_is_absent() {
        assert!(find("createNetwork").is_none());
    }
}
