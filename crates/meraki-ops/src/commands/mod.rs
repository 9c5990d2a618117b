//! Command dispatch: bridges CLI args -> dashboard facade -> output formatting.

pub mod clients;
pub mod health;
pub mod inventory;
pub mod menu;
pub mod orgs;
pub mod switch_ports;
pub mod util;
pub mod wifi_signal;

use meraki_core::{Dashboard, DashboardConfig, ProductType};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a dashboard-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    dashboard: &Dashboard,
    config: &DashboardConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Orgs(args) => orgs::handle(dashboard, &args, global).await,
        Command::Inventory(args) => {
            inventory::handle(dashboard, &config.org_id, &args, global).await
        }
        Command::SwitchHealth(args) => {
            let network_id = util::network_or_default(args.network_id.as_deref(), config);
            health::handle(
                dashboard,
                ProductType::Switch,
                &config.org_id,
                network_id,
                args.list.limit,
                global,
            )
            .await
        }
        Command::ApHealth(args) => {
            let network_id = util::network_or_default(args.network_id.as_deref(), config);
            health::handle(
                dashboard,
                ProductType::Wireless,
                &config.org_id,
                network_id,
                args.list.limit,
                global,
            )
            .await
        }
        Command::SwitchPorts(args) => switch_ports::handle(dashboard, config, &args, global).await,
        Command::WifiSignal(args) => wifi_signal::handle(dashboard, config, &args, global).await,
        Command::NetworkClients(args) => clients::handle(dashboard, config, &args, global).await,
        Command::Menu => menu::handle(dashboard, config, global).await,
        // Completions are handled before a dashboard exists
        Command::Completions(_) => Ok(()),
    }
}
