//! Shared helpers for command handlers.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use meraki_core::DashboardConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::output::{self, Painter};

/// `--network-id` when given and non-empty, else the configured network.
pub fn network_or_default<'a>(flag: Option<&'a str>, config: &'a DashboardConfig) -> &'a str {
    flag.map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(config.network_id.as_str())
}

/// Painter for table cells. Structured formats never carry escape codes.
pub fn painter(global: &GlobalOpts) -> Painter {
    Painter::new(
        matches!(global.output, OutputFormat::Table) && output::should_color(&global.color),
    )
}

pub fn fmt_time(at: Option<&DateTime<Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Orders present values before absent ones in either direction.
pub fn cmp_metric(a: Option<f64>, b: Option<f64>, desc: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if desc => y.total_cmp(&x),
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn absent_metrics_sort_last_both_ways() {
        let mut values = vec![None, Some(10.0), Some(30.0), None, Some(20.0)];

        values.sort_by(|a, b| cmp_metric(*a, *b, false));
        assert_eq!(values, vec![Some(10.0), Some(20.0), Some(30.0), None, None]);

        values.sort_by(|a, b| cmp_metric(*a, *b, true));
        assert_eq!(values, vec![Some(30.0), Some(20.0), Some(10.0), None, None]);
    }

    #[test]
    fn empty_network_flag_falls_back_to_config() {
        let config = DashboardConfig::new(
            String::from("k").into(),
            "https://api.meraki.com/api/v1".parse().unwrap(),
            "O_1",
            "N_cfg",
        );
        assert_eq!(network_or_default(Some("  "), &config), "N_cfg");
        assert_eq!(network_or_default(None, &config), "N_cfg");
        assert_eq!(network_or_default(Some("N_flag"), &config), "N_flag");
    }
}
