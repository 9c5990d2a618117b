//! Clap derive structures for the `meraki-ops` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. This file
//! is also compiled by `build.rs` for man page generation, so it may only
//! depend on clap and clap_complete.

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

/// Default row cap for every listing command.
pub const DEFAULT_LIMIT: usize = 200;

/// Default lookback window for signal quality and client listings.
pub const DEFAULT_TIMESPAN: u32 = 86_400;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// meraki-ops -- read-only operations CLI for the Meraki dashboard
#[derive(Debug, Parser)]
#[command(
    name = "meraki-ops",
    version,
    about = "Query Meraki dashboard organizations, devices, ports and clients",
    long_about = "A read-only operations CLI for the Meraki cloud dashboard.\n\n\
        Every command can run over the direct REST client or the SDK-style\n\
        client (--mode); both produce the same records.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Data access backend (overrides MERAKI_MODE and the config file)
    #[arg(long, short = 'm', global = true)]
    pub mode: Option<ModeArg>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MERAKI_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Shared Enums ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Direct HTTP client
    Rest,
    /// SDK-style client
    Sdk,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConnArg {
    Wired,
    Wireless,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SignalSort {
    Snr,
    Rssi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClientSort {
    /// Sent + received
    Usage,
    Sent,
    Recv,
    Name,
    LastSeen,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List organizations (name + id)
    Orgs(LimitArgs),

    /// List device inventory for the configured organization
    #[command(alias = "inv")]
    Inventory(LimitArgs),

    /// Switch status (online/offline) for a network
    SwitchHealth(HealthArgs),

    /// Access point status for a network
    ApHealth(HealthArgs),

    /// Port statuses for one switch or every switch in a network
    SwitchPorts(SwitchPortsArgs),

    /// Per-client wireless signal quality (SNR / RSSI)
    #[command(alias = "signal")]
    WifiSignal(WifiSignalArgs),

    /// Clients seen on a network, with usage
    #[command(alias = "clients")]
    NetworkClients(NetworkClientsArgs),

    /// Interactive menu over the configured organization and network
    Menu,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Command Arguments ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LimitArgs {
    /// Maximum rows to show
    #[arg(long, short = 'l', default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct HealthArgs {
    /// Network to inspect (defaults to MERAKI_NETWORK_ID)
    #[arg(long)]
    pub network_id: Option<String>,

    #[command(flatten)]
    pub list: LimitArgs,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["serial", "all"])))]
pub struct SwitchPortsArgs {
    /// Switch serial (e.g. Q2XX-XXXX-XXXX)
    #[arg(long)]
    pub serial: Option<String>,

    /// Every switch in the network
    #[arg(long)]
    pub all: bool,

    /// Network used with --all (defaults to MERAKI_NETWORK_ID)
    #[arg(long, requires = "all")]
    pub network_id: Option<String>,

    /// Window start (ISO 8601)
    #[arg(long)]
    pub t0: Option<String>,

    /// Window end (ISO 8601)
    #[arg(long)]
    pub t1: Option<String>,

    #[command(flatten)]
    pub list: LimitArgs,
}

#[derive(Debug, Args)]
pub struct WifiSignalArgs {
    /// Network to inspect (defaults to MERAKI_NETWORK_ID)
    #[arg(long)]
    pub network_id: Option<String>,

    /// Restrict to these AP serials (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub serials: Vec<String>,

    /// Lookback window in seconds
    #[arg(long, default_value_t = DEFAULT_TIMESPAN)]
    pub timespan: u32,

    /// Sort samples by this metric
    #[arg(long)]
    pub sort: Option<SignalSort>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    #[command(flatten)]
    pub list: LimitArgs,
}

#[derive(Debug, Args)]
pub struct NetworkClientsArgs {
    /// Network to inspect (defaults to MERAKI_NETWORK_ID)
    #[arg(long)]
    pub network_id: Option<String>,

    /// Lookback window in seconds
    #[arg(long, default_value_t = DEFAULT_TIMESPAN)]
    pub timespan: u32,

    /// Only clients last seen over this connection type
    #[arg(long)]
    pub conn: Option<ConnArg>,

    /// Sort key
    #[arg(long, default_value = "usage")]
    pub sort: ClientSort,

    /// Keep only the first N clients after sorting
    #[arg(long)]
    pub top: Option<usize>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    #[command(flatten)]
    pub list: LimitArgs,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
