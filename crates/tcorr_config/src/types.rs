//! Configuration types deserialized from `tcorr.toml`.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The top-level run configuration parsed from `tcorr.toml`.
#[derive(Debug, Deserialize)]
pub struct RunConfig {
    /// Engine settings shared by every tuple.
    #[serde(default)]
    pub run: RunSettings,
    /// Clock periods in nanoseconds keyed by design name.
    #[serde(default)]
    pub periods: BTreeMap<String, f64>,
    /// The comparison tuples to process.
    #[serde(default)]
    pub tuples: Vec<TupleSpec>,
}

impl RunConfig {
    /// Resolves the clock period for a tuple.
    ///
    /// The tuple's `short` name is looked up first, then its `design` name —
    /// the same fallback order the period table has historically used.
    pub fn period_for(&self, tuple: &TupleSpec) -> Option<f64> {
        if let Some(short) = &tuple.short {
            if let Some(period) = self.periods.get(short) {
                return Some(*period);
            }
        }
        self.periods.get(&tuple.design).copied()
    }
}

/// Engine settings shared by every comparison tuple.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Directory where CSV tables are written.
    pub output_dir: String,
    /// Number of worst outliers kept per tuple.
    pub top_outliers: usize,
    /// Upper sanity bound on per-arc delays; entries with a larger delay on
    /// either side are excluded from correlation.
    pub max_delay_ns: f64,
    /// Number of trailing hierarchy segments to digit-abstract when grouping;
    /// `-1` abstracts every segment.
    pub shrink_depth: i64,
    /// Whether a summary table missing its `reg2reg` row fails the tuple.
    /// When `false`, the missing row's metrics degrade to 0.0.
    pub require_reg2reg: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            output_dir: "out".to_string(),
            top_outliers: 100,
            max_delay_ns: 1.0,
            shrink_depth: -1,
            require_reg2reg: true,
        }
    }
}

/// One comparison tuple: a test result set and a target (golden) result set.
#[derive(Debug, Clone, Deserialize)]
pub struct TupleSpec {
    /// Label of the test (estimating) side, e.g. `pta_b005`.
    pub test: String,
    /// Label of the target (golden) side, e.g. `leda_b005`.
    pub target: String,
    /// Design name for the clock-period lookup.
    pub design: String,
    /// Preferred short name for the clock-period lookup.
    #[serde(default)]
    pub short: Option<String>,
    /// Path to the keyed arc/endpoint delay map (JSON).
    pub arcs: String,
    /// Path to the test-side endpoint scatter file.
    pub scatter_test: String,
    /// Path to the target-side endpoint scatter file.
    pub scatter_target: String,
    /// Path to the test-side QoR timing report (optionally gzipped).
    /// Slack scoring runs only when both summary paths are present.
    #[serde(default)]
    pub summary_test: Option<String>,
    /// Path to the target-side QoR timing report (optionally gzipped).
    #[serde(default)]
    pub summary_target: Option<String>,
}

impl TupleSpec {
    /// The tuple's display name: `<test>-<target>`.
    pub fn name(&self) -> String {
        format!("{}-{}", self.test, self.target)
    }

    /// Returns `true` if both summary reports are configured.
    pub fn has_summaries(&self) -> bool {
        self.summary_test.is_some() && self.summary_target.is_some()
    }
}
