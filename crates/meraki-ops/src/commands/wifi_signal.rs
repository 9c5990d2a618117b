//! Per-client wireless signal quality.

use tabled::Tabled;

use meraki_core::{Dashboard, DashboardConfig, SignalQualityQuery, SignalSample};

use crate::cli::{GlobalOpts, SignalSort, WifiSignalArgs};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

#[derive(Tabled)]
struct SignalRow {
    #[tabled(rename = "Client ID")]
    client_id: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "SNR")]
    snr: String,
    #[tabled(rename = "RSSI")]
    rssi: String,
}

impl SignalRow {
    fn new(s: &SignalSample, painter: Painter) -> Self {
        Self {
            client_id: s.client_id.clone(),
            mac: s.client_mac.clone(),
            network: if s.network_name.is_empty() {
                s.network_id.clone()
            } else {
                s.network_name.clone()
            },
            snr: painter.snr(s.snr),
            rssi: painter.rssi(s.rssi),
        }
    }
}

fn sort_samples(samples: &mut [SignalSample], key: SignalSort, desc: bool) {
    samples.sort_by(|a, b| match key {
        SignalSort::Snr => util::cmp_metric(a.snr, b.snr, desc),
        SignalSort::Rssi => util::cmp_metric(a.rssi, b.rssi, desc),
    });
}

pub async fn handle(
    dashboard: &Dashboard,
    config: &DashboardConfig,
    args: &WifiSignalArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let query = SignalQualityQuery {
        timespan: args.timespan,
        network_id: Some(util::network_or_default(args.network_id.as_deref(), config).to_owned()),
        serials: args
            .serials
            .iter()
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect(),
        ..SignalQualityQuery::default()
    };

    let mut samples = dashboard.wifi_signal(&config.org_id, &query).await?;
    if let Some(key) = args.sort {
        sort_samples(&mut samples, key, args.desc);
    }
    samples.truncate(args.list.limit);

    let painter = util::painter(global);
    let out = output::render_list(
        &global.output,
        &samples,
        |s| SignalRow::new(s, painter),
        |s| s.client_id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    output::print_footer(&global.output, &painter.signal_legend(), global.quiet);
    Ok(())
}
