//! Switch and access point health for one network.

use tabled::Tabled;

use meraki_core::{Dashboard, Device, ProductType};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

#[derive(Tabled)]
struct HealthRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last Reported")]
    last_reported: String,
}

impl HealthRow {
    fn new(d: &Device, painter: Painter) -> Self {
        Self {
            name: d.name.clone().unwrap_or_default(),
            serial: d.serial.clone(),
            model: d.model.clone(),
            status: painter.status(d.status),
            last_reported: util::fmt_time(d.last_reported_at.as_ref()),
        }
    }
}

pub async fn handle(
    dashboard: &Dashboard,
    product_type: ProductType,
    org_id: &str,
    network_id: &str,
    limit: usize,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut devices = match product_type {
        ProductType::Switch => dashboard.switch_health(org_id, network_id).await?,
        ProductType::Wireless => dashboard.ap_health(org_id, network_id).await?,
    };
    devices.truncate(limit);

    let painter = util::painter(global);
    let out = output::render_list(
        &global.output,
        &devices,
        |d| HealthRow::new(d, painter),
        |d| d.serial.clone(),
    )?;
    output::print_output(&out, global.quiet);

    let online = devices.iter().filter(|d| d.status.is_online()).count();
    output::print_footer(
        &global.output,
        &format!(
            "{online}/{} online    {}",
            devices.len(),
            painter.status_legend()
        ),
        global.quiet,
    );
    Ok(())
}
