//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders records in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.
//! Status and signal cells are colored with `owo-colors` when enabled.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use meraki_core::DeviceStatus;

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Signal thresholds ────────────────────────────────────────────────

/// SNR (dB) at or above this is good.
pub const SNR_GOOD: f64 = 25.0;
/// SNR (dB) at or above this (and below good) is fair.
pub const SNR_FAIR: f64 = 15.0;
/// RSSI (dBm) at or above this is good.
pub const RSSI_GOOD: f64 = -67.0;
/// RSSI (dBm) at or above this (and below good) is fair.
pub const RSSI_FAIR: f64 = -75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Good,
    Fair,
    Poor,
}

impl Quality {
    pub fn of_snr(snr: f64) -> Self {
        Self::grade(snr, SNR_GOOD, SNR_FAIR)
    }

    pub fn of_rssi(rssi: f64) -> Self {
        Self::grade(rssi, RSSI_GOOD, RSSI_FAIR)
    }

    fn grade(value: f64, good: f64, fair: f64) -> Self {
        if value >= good {
            Self::Good
        } else if value >= fair {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Cell painter; a no-op when color is off.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn status(self, status: DeviceStatus) -> String {
        let text = status.to_string();
        if !self.enabled {
            return text;
        }
        match status {
            DeviceStatus::Online => text.green().to_string(),
            DeviceStatus::Offline => text.red().to_string(),
            DeviceStatus::Alerting => text.yellow().to_string(),
            DeviceStatus::Dormant | DeviceStatus::Unknown => text.dimmed().to_string(),
        }
    }

    /// Port status text as reported (`Connected`, `Disconnected`, `Disabled`).
    pub fn port_status(self, status: &str) -> String {
        if !self.enabled {
            return status.to_owned();
        }
        match status.to_ascii_lowercase().as_str() {
            "connected" => status.green().to_string(),
            "disconnected" => status.red().to_string(),
            _ => status.dimmed().to_string(),
        }
    }

    pub fn quality(self, text: &str, quality: Quality) -> String {
        if !self.enabled {
            return text.to_owned();
        }
        match quality {
            Quality::Good => text.green().to_string(),
            Quality::Fair => text.yellow().to_string(),
            Quality::Poor => text.red().to_string(),
        }
    }

    pub fn snr(self, snr: Option<f64>) -> String {
        snr.map_or_else(String::new, |v| self.quality(&fmt_metric(v), Quality::of_snr(v)))
    }

    pub fn rssi(self, rssi: Option<f64>) -> String {
        rssi.map_or_else(String::new, |v| {
            self.quality(&fmt_metric(v), Quality::of_rssi(v))
        })
    }

    /// Legend printed under signal tables.
    pub fn signal_legend(self) -> String {
        let good = self.quality("good", Quality::Good);
        let fair = self.quality("fair", Quality::Fair);
        let poor = self.quality("poor", Quality::Poor);
        format!(
            "SNR (dB):   {good} >= {SNR_GOOD}  {fair} {SNR_FAIR}-{SNR_GOOD}  {poor} < {SNR_FAIR}\n\
             RSSI (dBm): {good} >= {RSSI_GOOD}  {fair} {RSSI_FAIR} to {RSSI_GOOD}  {poor} < {RSSI_FAIR}"
        )
    }

    /// Legend printed under device health tables.
    pub fn status_legend(self) -> String {
        [
            DeviceStatus::Online,
            DeviceStatus::Alerting,
            DeviceStatus::Offline,
            DeviceStatus::Dormant,
        ]
        .into_iter()
        .map(|s| self.status(s))
        .collect::<Vec<_>>()
        .join("  ")
    }
}

fn fmt_metric(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print a legend or footer. Table output only.
pub fn print_footer(format: &OutputFormat, footer: &str, quiet: bool) {
    if matches!(format, OutputFormat::Table) {
        print_output(footer, quiet);
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    out.map_err(|e| CliError::Serialize(e.to_string()))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Serialize(e.to_string()))
}
