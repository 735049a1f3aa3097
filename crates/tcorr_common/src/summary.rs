//! Timing-summary table rows extracted from QoR reports.

use serde::{Deserialize, Serialize};

/// Label of the synthetic design-wide summary row.
pub const OVERALL_SUMMARY: &str = "OVERALL_SUMMARY";

/// Label of the register-to-register path group.
pub const REG2REG: &str = "reg2reg";

/// One path group's timing metrics from a QoR report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingSummaryRow {
    /// Path group label (e.g. `reg2reg`, `in2reg`, or [`OVERALL_SUMMARY`]).
    pub path_group: String,
    /// Worst negative slack in nanoseconds.
    pub wns_ns: f64,
    /// Total negative slack in nanoseconds.
    pub tns_ns: f64,
    /// Slack of the 100th-worst path, when the report provides it.
    pub wns100_ns: Option<f64>,
    /// Number of violating paths.
    pub violations: u32,
    /// Maximum levels of logic on the critical path.
    pub logic_levels: u32,
    /// Critical path length in nanoseconds.
    pub path_length_ns: f64,
    /// Clock period of the path group, when the report provides it.
    pub clock_period_ns: Option<f64>,
}

/// A timing summary: path-group rows keyed by label, in report order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    rows: Vec<TimingSummaryRow>,
}

impl TimingSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row. Later rows with a duplicate label are kept but never
    /// returned by [`row`](Self::row), which matches first.
    pub fn push(&mut self, row: TimingSummaryRow) {
        self.rows.push(row);
    }

    /// Returns the first row with the given path-group label.
    pub fn row(&self, path_group: &str) -> Option<&TimingSummaryRow> {
        self.rows.iter().find(|r| r.path_group == path_group)
    }

    /// Returns all rows in report order.
    pub fn rows(&self) -> &[TimingSummaryRow] {
        &self.rows
    }

    /// Returns `true` if the summary has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
