//! Interactive menu over the configured organization and network.

use dialoguer::{Input, Select, theme::ColorfulTheme};

use meraki_core::{Dashboard, DashboardConfig, ProductType};

use crate::cli::{
    ClientSort, DEFAULT_TIMESPAN, GlobalOpts, LimitArgs, NetworkClientsArgs, SwitchPortsArgs,
    WifiSignalArgs,
};
use crate::error::CliError;

use super::{clients, health, inventory, switch_ports, wifi_signal};

const MENU_LIMIT: usize = 50;

const ITEMS: &[&str] = &[
    "Inventory (org)",
    "Switch health (network)",
    "AP health (network)",
    "Switch ports (serial or all)",
    "Wi-Fi signal quality (network)",
    "Network clients (top usage)",
    "Exit",
];

fn prompt_err(err: dialoguer::Error) -> CliError {
    CliError::Io(std::io::Error::other(err))
}

fn ask_limit(theme: &ColorfulTheme, default: usize) -> Result<usize, CliError> {
    Input::with_theme(theme)
        .with_prompt("Max rows")
        .default(default)
        .interact_text()
        .map_err(prompt_err)
}

pub async fn handle(
    dashboard: &Dashboard,
    config: &DashboardConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let org_name = dashboard.resolve_org_name(&config.org_id).await;
    let net_name = dashboard.resolve_network_name(&config.network_id).await;

    eprintln!("--- Current selection ---");
    eprintln!("Mode      : {}", dashboard.mode());
    eprintln!("Org ID    : {}", config.org_id);
    eprintln!("Org Name  : {}", or_unresolved(&org_name));
    eprintln!("Network ID: {}", config.network_id);
    eprintln!("Net Name  : {}", or_unresolved(&net_name));
    eprintln!("-------------------------");

    let theme = ColorfulTheme::default();
    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("Menu")
            .items(ITEMS)
            .default(0)
            .interact()
            .map_err(prompt_err)?;

        let result = match choice {
            0 => {
                let list = LimitArgs {
                    limit: ask_limit(&theme, MENU_LIMIT)?,
                };
                inventory::handle(dashboard, &config.org_id, &list, global).await
            }
            1 | 2 => {
                let product_type = if choice == 1 {
                    ProductType::Switch
                } else {
                    ProductType::Wireless
                };
                let limit = ask_limit(&theme, MENU_LIMIT)?;
                health::handle(
                    dashboard,
                    product_type,
                    &config.org_id,
                    &config.network_id,
                    limit,
                    global,
                )
                .await
            }
            3 => {
                let args = ask_switch_ports(&theme)?;
                switch_ports::handle(dashboard, config, &args, global).await
            }
            4 => {
                let args = WifiSignalArgs {
                    network_id: None,
                    serials: Vec::new(),
                    timespan: DEFAULT_TIMESPAN,
                    sort: None,
                    desc: false,
                    list: LimitArgs {
                        limit: ask_limit(&theme, MENU_LIMIT)?,
                    },
                };
                wifi_signal::handle(dashboard, config, &args, global).await
            }
            5 => {
                let args = NetworkClientsArgs {
                    network_id: None,
                    timespan: DEFAULT_TIMESPAN,
                    conn: None,
                    sort: ClientSort::Usage,
                    top: Some(ask_limit(&theme, 20)?),
                    desc: true,
                    list: LimitArgs {
                        limit: crate::cli::DEFAULT_LIMIT,
                    },
                };
                clients::handle(dashboard, config, &args, global).await
            }
            _ => {
                eprintln!("Bye.");
                return Ok(());
            }
        };

        // Errors end the action, not the session.
        if let Err(err) = result {
            eprintln!("{:?}", miette::Report::new(err));
        }
    }
}

fn ask_switch_ports(theme: &ColorfulTheme) -> Result<SwitchPortsArgs, CliError> {
    let scope = Select::with_theme(theme)
        .with_prompt("Switches")
        .items(&["All switches in network", "Single switch by serial"])
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let serial = if scope == 1 {
        let serial: String = Input::with_theme(theme)
            .with_prompt("Switch serial (e.g. Q2XX-XXXX-XXXX)")
            .interact_text()
            .map_err(prompt_err)?;
        Some(serial.trim().to_owned())
    } else {
        None
    };

    Ok(SwitchPortsArgs {
        all: serial.is_none(),
        serial,
        network_id: None,
        t0: None,
        t1: None,
        list: LimitArgs {
            limit: ask_limit(theme, crate::cli::DEFAULT_LIMIT)?,
        },
    })
}

fn or_unresolved(name: &str) -> &str {
    if name.is_empty() {
        "(not resolved)"
    } else {
        name
    }
}
