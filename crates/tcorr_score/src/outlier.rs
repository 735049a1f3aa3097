//! Ranking of the worst per-arc delay discrepancies.
//!
//! Sorts the delay map by absolute delay difference, keeps the worst `top_n`
//! entries, and attaches best-effort placement diagnostics (pin locations,
//! driving cells) so an engineer can chase each discrepancy in the layout.
//!
//! The reported `mean_abs_error` is the mean over the *kept* entries — a
//! worst-N error profile, not a population-wide MAE. The composite score's
//! weights were calibrated against this statistic; renaming or widening it
//! would silently shift every calibrated result.

use serde::Serialize;
use std::collections::BTreeMap;
use tcorr_report::{RawArcEntry, RawArcSide};

/// Sentinel for a diagnostic field the input did not provide.
pub const UNAVAILABLE: &str = "N/A";

/// One ranked discrepancy with its placement diagnostics.
#[derive(Clone, Debug, Serialize)]
pub struct OutlierEntry {
    /// The entity id from the delay map.
    pub id: String,
    /// Hierarchical name of the driving pin.
    pub from: String,
    /// Hierarchical name of the driven pin.
    pub to: String,
    /// Signed test-minus-golden delay difference in nanoseconds.
    pub delta_delay: f64,
    /// Location of the test side's first pin.
    pub key_from_location: String,
    /// Location of the test side's last pin.
    pub key_to_location: String,
    /// Location of the golden side's first pin.
    pub value_from_location: String,
    /// Location of the golden side's last pin.
    pub value_to_location: String,
    /// Library cell driving the test side.
    pub key_driving_cell: String,
    /// Library cell driving the golden side.
    pub value_driving_cell: String,
}

/// The ranked worst-N outliers and their error statistics.
#[derive(Clone, Debug, Serialize)]
pub struct OutlierReport {
    /// Entries sorted non-increasing by `|delta_delay|`; ties keep id order.
    pub ranked: Vec<OutlierEntry>,
    /// Mean of `|delta_delay|` over the kept entries (see module docs).
    pub mean_abs_error: f64,
    /// `|delta_delay|` of the worst kept entry.
    pub max_abs_error: f64,
}

/// Ranks the delay map's entries by absolute delay difference.
///
/// `top_n = None` keeps every entry. An empty map yields an empty ranking
/// with zero statistics rather than a division error.
pub fn rank_outliers(raw: &BTreeMap<String, RawArcEntry>, top_n: Option<usize>) -> OutlierReport {
    let mut ranked: Vec<OutlierEntry> = raw
        .iter()
        .map(|(id, entry)| build_entry(id, entry))
        .collect();
    ranked.sort_by(|a, b| b.delta_delay.abs().total_cmp(&a.delta_delay.abs()));

    if let Some(top_n) = top_n {
        ranked.truncate(top_n);
    }

    // Statistics are over the kept subset, after truncation.
    let mean_abs_error = if ranked.is_empty() {
        0.0
    } else {
        ranked.iter().map(|e| e.delta_delay.abs()).sum::<f64>() / ranked.len() as f64
    };
    let max_abs_error = ranked.first().map_or(0.0, |e| e.delta_delay.abs());

    OutlierReport {
        ranked,
        mean_abs_error,
        max_abs_error,
    }
}

/// Builds one entry, degrading each missing diagnostic field to
/// [`UNAVAILABLE`] without dropping the entry.
fn build_entry(id: &str, entry: &RawArcEntry) -> OutlierEntry {
    OutlierEntry {
        id: id.to_string(),
        from: entry.from.clone().unwrap_or_else(|| UNAVAILABLE.to_string()),
        to: entry.to.clone().unwrap_or_else(|| UNAVAILABLE.to_string()),
        delta_delay: entry.delta(),
        key_from_location: pin_location(&entry.key, Pick::First),
        key_to_location: pin_location(&entry.key, Pick::Last),
        value_from_location: pin_location(&entry.value, Pick::First),
        value_to_location: pin_location(&entry.value, Pick::Last),
        key_driving_cell: driving_cell(&entry.key),
        value_driving_cell: driving_cell(&entry.value),
    }
}

enum Pick {
    First,
    Last,
}

fn pin_location(side: &RawArcSide, pick: Pick) -> String {
    let pin = match pick {
        Pick::First => side.pins.first(),
        Pick::Last => side.pins.last(),
    };
    pin.and_then(|p| p.location.as_ref())
        .map_or_else(|| UNAVAILABLE.to_string(), |loc| loc.to_string())
}

fn driving_cell(side: &RawArcSide) -> String {
    side.pins
        .first()
        .and_then(|p| p.cell.clone())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}
