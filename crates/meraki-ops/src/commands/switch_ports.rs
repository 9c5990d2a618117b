//! Switch port statuses for one switch or every switch in a network.

use serde::Serialize;
use tabled::Tabled;

use meraki_core::{Dashboard, DashboardConfig, PortWindow, SwitchPort, SwitchPorts};

use crate::cli::{GlobalOpts, SwitchPortsArgs};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

/// One port, tagged with the switch it belongs to.
#[derive(Debug, Serialize)]
struct PortLine {
    switch: String,
    serial: String,
    #[serde(flatten)]
    port: SwitchPort,
}

#[derive(Tabled)]
struct PortRow {
    #[tabled(rename = "Switch")]
    switch: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Uplink")]
    uplink: bool,
    #[tabled(rename = "Speed")]
    speed: String,
    #[tabled(rename = "Duplex")]
    duplex: String,
    #[tabled(rename = "PoE")]
    poe: bool,
    #[tabled(rename = "Clients")]
    clients: String,
    #[tabled(rename = "STP")]
    stp: String,
    #[tabled(rename = "Errors")]
    errors: usize,
    #[tabled(rename = "Warnings")]
    warnings: usize,
}

impl PortRow {
    fn new(line: &PortLine, painter: Painter) -> Self {
        let p = &line.port;
        Self {
            switch: line.switch.clone(),
            serial: line.serial.clone(),
            port: p.port_id.clone(),
            status: painter.port_status(&p.status),
            uplink: p.is_uplink,
            speed: p.speed.clone(),
            duplex: p.duplex.clone(),
            poe: p.poe_allocated,
            clients: p.client_count.map(|c| c.to_string()).unwrap_or_default(),
            stp: p.spanning_tree_statuses.join(","),
            errors: p.errors.len(),
            warnings: p.warnings.len(),
        }
    }
}

/// Flatten per-switch groups into at most `limit` port lines.
fn flatten(switches: Vec<SwitchPorts>, limit: usize) -> Vec<PortLine> {
    switches
        .into_iter()
        .flat_map(|sw| {
            let SwitchPorts {
                serial,
                name,
                ports,
            } = sw;
            ports.into_iter().map(move |port| PortLine {
                switch: name.clone(),
                serial: serial.clone(),
                port,
            })
        })
        .take(limit)
        .collect()
}

pub async fn handle(
    dashboard: &Dashboard,
    config: &DashboardConfig,
    args: &SwitchPortsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let window = PortWindow {
        t0: args.t0.clone(),
        t1: args.t1.clone(),
    };

    let switches = match args.serial.as_deref() {
        Some(serial) => vec![dashboard.switch_ports_for_serial(serial, &window).await?],
        None => {
            let network_id = util::network_or_default(args.network_id.as_deref(), config);
            dashboard
                .switch_ports_for_network(&config.org_id, network_id, &window)
                .await?
        }
    };
    let lines = flatten(switches, args.list.limit);

    let painter = util::painter(global);
    let out = output::render_list(
        &global.output,
        &lines,
        |l| PortRow::new(l, painter),
        |l| format!("{}/{}", l.serial, l.port.port_id),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
