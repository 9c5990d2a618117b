//! Network clients with usage.

use std::cmp::Ordering;

use tabled::Tabled;

use meraki_core::{ClientsQuery, ConnectionType, Dashboard, DashboardConfig, NetworkClient};

use crate::cli::{ClientSort, ConnArg, GlobalOpts, NetworkClientsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Sent (MB)")]
    sent: String,
    #[tabled(rename = "Recv (MB)")]
    recv: String,
    #[tabled(rename = "Total (MB)")]
    total: String,
    #[tabled(rename = "Last Seen")]
    last_seen: String,
}

impl From<&NetworkClient> for ClientRow {
    fn from(c: &NetworkClient) -> Self {
        Self {
            name: c.name.clone(),
            mac: c.mac.clone(),
            ip: c.ip.clone().unwrap_or_default(),
            status: c.status.clone(),
            sent: format!("{:.2}", c.sent_mb()),
            recv: format!("{:.2}", c.recv_mb()),
            total: format!("{:.2}", c.total_mb()),
            last_seen: util::fmt_time(c.last_seen.as_ref()),
        }
    }
}

impl From<ConnArg> for ConnectionType {
    fn from(conn: ConnArg) -> Self {
        match conn {
            ConnArg::Wired => Self::Wired,
            ConnArg::Wireless => Self::Wireless,
        }
    }
}

fn compare(a: &NetworkClient, b: &NetworkClient, key: ClientSort) -> Ordering {
    match key {
        ClientSort::Usage => a.total_mb().total_cmp(&b.total_mb()),
        ClientSort::Sent => a.usage_sent_kb.total_cmp(&b.usage_sent_kb),
        ClientSort::Recv => a.usage_recv_kb.total_cmp(&b.usage_recv_kb),
        ClientSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        ClientSort::LastSeen => a.last_seen.cmp(&b.last_seen),
    }
}

/// Sort, then keep `top` (when given) and at most `limit` rows.
fn rank(
    mut clients: Vec<NetworkClient>,
    key: ClientSort,
    desc: bool,
    top: Option<usize>,
    limit: usize,
) -> Vec<NetworkClient> {
    clients.sort_by(|a, b| {
        let ord = compare(a, b, key);
        if desc { ord.reverse() } else { ord }
    });
    clients.truncate(top.unwrap_or(usize::MAX).min(limit));
    clients
}

pub async fn handle(
    dashboard: &Dashboard,
    config: &DashboardConfig,
    args: &NetworkClientsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let network_id = util::network_or_default(args.network_id.as_deref(), config);
    let query = ClientsQuery {
        timespan: args.timespan,
        connection_types: args.conn.map(ConnectionType::from).into_iter().collect(),
        ..ClientsQuery::default()
    };

    let clients = dashboard.network_clients(network_id, &query).await?;
    let fetched = clients.len();
    let clients = rank(clients, args.sort, args.desc, args.top, args.list.limit);

    let out = output::render_list(
        &global.output,
        &clients,
        |c| ClientRow::from(c),
        |c| c.mac.clone(),
    )?;
    output::print_output(&out, global.quiet);

    let total_mb: f64 = clients.iter().map(NetworkClient::total_mb).sum();
    output::print_footer(
        &global.output,
        &format!(
            "{} of {fetched} clients shown, {total_mb:.2} MB total",
            clients.len()
        ),
        global.quiet,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(name: &str, sent_kb: f64, recv_kb: f64) -> NetworkClient {
        NetworkClient {
            id: name.into(),
            mac: String::new(),
            name: name.into(),
            description: None,
            ip: None,
            status: "Online".into(),
            usage_sent_kb: sent_kb,
            usage_recv_kb: recv_kb,
            last_seen: None,
            recent_device_connection: None,
        }
    }

    fn names(clients: &[NetworkClient]) -> Vec<&str> {
        clients.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn top_usage_descending() {
        let clients = vec![
            client("small", 10.0, 10.0),
            client("big", 4096.0, 2048.0),
            client("medium", 1024.0, 0.0),
        ];
        let ranked = rank(clients, ClientSort::Usage, true, Some(2), 200);
        assert_eq!(names(&ranked), ["big", "medium"]);
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let clients = vec![client("bravo", 0.0, 0.0), client("Alpha", 0.0, 0.0)];
        let ranked = rank(clients, ClientSort::Name, false, None, 200);
        assert_eq!(names(&ranked), ["Alpha", "bravo"]);
    }

    #[test]
    fn limit_caps_after_top() {
        let clients = vec![client("a", 1.0, 0.0), client("b", 2.0, 0.0), client("c", 3.0, 0.0)];
        let ranked = rank(clients, ClientSort::Sent, false, Some(3), 1);
        assert_eq!(names(&ranked), ["a"]);
    }
}
