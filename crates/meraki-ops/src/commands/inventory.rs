//! Organization inventory listing.

use tabled::Tabled;

use meraki_core::{Dashboard, Device};

use crate::cli::{GlobalOpts, LimitArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct InventoryRow {
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Network ID")]
    network_id: String,
    #[tabled(rename = "Claimed At")]
    claimed_at: String,
}

impl From<&Device> for InventoryRow {
    fn from(d: &Device) -> Self {
        Self {
            serial: d.serial.clone(),
            model: d.model.clone(),
            network_id: d.network_id.clone().unwrap_or_default(),
            claimed_at: util::fmt_time(d.claimed_at.as_ref()),
        }
    }
}

pub async fn handle(
    dashboard: &Dashboard,
    org_id: &str,
    args: &LimitArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut devices = dashboard.inventory(org_id).await?;
    devices.truncate(args.limit);

    let out = output::render_list(&global.output, &devices, |d| InventoryRow::from(d), |d| {
        d.serial.clone()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
