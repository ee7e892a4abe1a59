//! Output formatting for CLI display.

use crate::model::Coords;
use crate::session::{ListEntry, Metric, PanOptions};

/// One list entry as a single line:
/// `a3b0fc12  Running on March 15   🏃‍♂️ 10 km  ⏱ 50 min  ⚡️ 5 min/km  🦶🏼 178 spm`.
pub(super) fn format_entry(entry: &ListEntry) -> String {
    let short_id = entry.id.get(..8).unwrap_or(&entry.id);
    let metrics = [&entry.distance, &entry.duration, &entry.rate, &entry.effort]
        .into_iter()
        .map(format_metric)
        .collect::<Vec<_>>()
        .join("  ");
    format!("{short_id:<8}  {:<22} {metrics}", entry.title)
}

pub(super) fn format_pan(to: Coords, zoom: u8, options: PanOptions) -> String {
    if options.animated {
        format!(
            "Map → {to} (zoom {zoom}, {:.1}s pan)",
            options.duration.as_secs_f64()
        )
    } else {
        format!("Map → {to} (zoom {zoom})")
    }
}

fn format_metric(metric: &Metric) -> String {
    format!("{} {} {}", metric.icon, format_number(metric.value), metric.unit)
}

/// Whole numbers without decimals, everything else to one place.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
