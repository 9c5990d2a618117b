mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use meraki_core::{BackendMode, Dashboard, DashboardConfig};

use crate::cli::{Cli, Command, GlobalOpts, ModeArg};
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "meraki-ops", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let config = build_dashboard_config(&cli.global)?;
            let dashboard = Dashboard::connect(&config)?;

            tracing::debug!(command = ?cmd, mode = %dashboard.mode(), "dispatching command");
            commands::dispatch(cmd, &dashboard, &config, &cli.global).await
        }
    }
}

/// Settings from `.env`, the config file and the environment, with `--mode`
/// taking precedence over all of them.
fn build_dashboard_config(global: &GlobalOpts) -> Result<DashboardConfig, CliError> {
    let mut settings = meraki_config::load_settings()?;
    if let Some(mode) = global.mode {
        settings.mode = match mode {
            ModeArg::Rest => BackendMode::Rest,
            ModeArg::Sdk => BackendMode::Sdk,
        };
    }
    Ok(settings.into_dashboard_config()?)
}
