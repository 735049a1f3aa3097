//! The per-tuple comparison pipeline and its worker pool.
//!
//! Each comparison tuple is an independent unit of work: ingest the delay
//! map, scatter files, and (optionally) summary reports, then run the full
//! scoring chain. Tuples run concurrently on the rayon pool; the only shared
//! state is the thread-safe diagnostic sink. A failing tuple is captured as
//! its own outcome and never aborts its siblings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tcorr_config::{RunConfig, TupleSpec};
use tcorr_diagnostics::{Diagnostic, DiagnosticSink};
use tcorr_report::{load_arc_map, load_qor_report, load_scatter};
use tcorr_score::{
    average, build_records, compose, endpoint_records, fit_line, group_arcs, group_endpoints,
    points_from_groups, points_from_records, rank_outliers, score_slack, BuildOptions,
    CompositeInputs, GroupedRecord, RegressionFit, ShrinkDepth, SlackOptions, SlackScores,
};

use crate::export::write_outlier_csv;

/// Errors crossing the worker-pool boundary must be `Send + Sync`.
pub type TupleError = Box<dyn std::error::Error + Send + Sync>;

/// The flat metrics row of one successfully scored tuple.
#[derive(Debug)]
pub struct TupleMetrics {
    /// The tuple's display name (`<test>-<target>`).
    pub name: String,
    /// Number of arc records entering the raw correlation.
    pub num_arc: usize,
    /// Number of canonical arc groups.
    pub num_arc_group: usize,
    /// Number of matched endpoints entering the raw correlation.
    pub num_end: usize,
    /// Number of canonical endpoint groups.
    pub num_end_group: usize,
    /// Raw per-arc fit.
    pub arc: RegressionFit,
    /// Group-averaged per-arc fit.
    pub arc_grouped: RegressionFit,
    /// Raw per-endpoint fit.
    pub endpoint: RegressionFit,
    /// Group-averaged per-endpoint fit.
    pub endpoint_grouped: RegressionFit,
    /// MAE over the kept worst-N outliers.
    pub mean_abs_error: f64,
    /// Worst absolute delay discrepancy.
    pub max_abs_error: f64,
    /// Slack sub-scores, when summary reports were configured.
    pub slack: Option<SlackScores>,
    /// Composite fitness score, when slack scoring ran.
    pub composite: Option<f64>,
}

/// One tuple's result: its metrics row or the failure that stopped it.
pub struct TupleOutcome {
    /// The tuple's display name.
    pub name: String,
    /// The metrics row, or the isolated failure.
    pub result: Result<TupleMetrics, TupleError>,
}

/// Processes every tuple of the configuration on the worker pool.
///
/// Outcomes come back in configuration order regardless of completion order.
pub fn run_batch(config: &RunConfig, sink: &DiagnosticSink) -> Result<Vec<TupleOutcome>, TupleError> {
    let output_dir = PathBuf::from(&config.run.output_dir);
    std::fs::create_dir_all(&output_dir)
        .map_err(|e| format!("cannot create output directory '{}': {e}", output_dir.display()))?;

    let outcomes = config
        .tuples
        .par_iter()
        .map(|tuple| TupleOutcome {
            name: tuple.name(),
            result: process_tuple(tuple, config, &output_dir, sink),
        })
        .collect();
    Ok(outcomes)
}

/// Runs the full scoring chain for one tuple.
pub fn process_tuple(
    tuple: &TupleSpec,
    config: &RunConfig,
    output_dir: &Path,
    sink: &DiagnosticSink,
) -> Result<TupleMetrics, TupleError> {
    let name = tuple.name();
    sink.emit(Diagnostic::note("processing comparison tuple").with_origin(&name));

    let depth = ShrinkDepth::from_level(config.run.shrink_depth);
    let build_opts = BuildOptions {
        max_delay_ns: config.run.max_delay_ns,
    };

    // Arc correlation: raw and group-averaged.
    let arc_map = load_arc_map(Path::new(&tuple.arcs))?;
    let built = build_records(&arc_map, &build_opts, sink)?;
    let (xs, ys) = points_from_records(&built.records);
    let arc = fit_line(&xs, &ys)?;
    let arc_groups = group_arcs(&built.records, depth, sink)?;
    let arc_grouped = fit_groups(&average(&arc_groups))?;

    // Endpoint correlation from the two scatter files.
    let scatter_test = load_scatter(Path::new(&tuple.scatter_test), sink)?;
    let scatter_target = load_scatter(Path::new(&tuple.scatter_target), sink)?;
    let endpoints = endpoint_records(&scatter_test, &scatter_target);
    let (xs, ys) = points_from_records(&endpoints);
    let endpoint = fit_line(&xs, &ys)?;
    let end_groups = group_endpoints(&endpoints, depth)?;
    let endpoint_grouped = fit_groups(&average(&end_groups))?;

    // Worst-N outlier profile, exported per tuple.
    let outliers = rank_outliers(&arc_map, Some(config.run.top_outliers));
    write_outlier_csv(&output_dir.join(format!("{name}_filter.csv")), &outliers)?;

    // Slack scoring only runs when both summary reports are configured.
    let slack = tuple
        .has_summaries()
        .then(|| score_tuple_slack(tuple, config, sink))
        .transpose()?;

    let composite = slack.as_ref().map(|slack| {
        compose(&CompositeInputs {
            slack,
            arc: &arc,
            arc_grouped: &arc_grouped,
            endpoint: &endpoint,
            endpoint_grouped: &endpoint_grouped,
            mean_abs_error: outliers.mean_abs_error,
        })
    });

    Ok(TupleMetrics {
        name,
        num_arc: built.records.len(),
        num_arc_group: arc_groups.len(),
        num_end: endpoints.len(),
        num_end_group: end_groups.len(),
        arc,
        arc_grouped,
        endpoint,
        endpoint_grouped,
        mean_abs_error: outliers.mean_abs_error,
        max_abs_error: outliers.max_abs_error,
        slack,
        composite,
    })
}

/// Fits the point set of an averaged group map.
fn fit_groups(averaged: &BTreeMap<String, GroupedRecord>) -> Result<RegressionFit, TupleError> {
    let (xs, ys) = points_from_groups(averaged);
    Ok(fit_line(&xs, &ys)?)
}

/// Loads both summary reports and runs the slack scorer.
fn score_tuple_slack(
    tuple: &TupleSpec,
    config: &RunConfig,
    sink: &DiagnosticSink,
) -> Result<SlackScores, TupleError> {
    // Both paths exist: the caller checked has_summaries().
    let (Some(summary_test), Some(summary_target)) = (&tuple.summary_test, &tuple.summary_target)
    else {
        return Err("tuple has no summary reports".into());
    };
    let period = config
        .period_for(tuple)
        .ok_or_else(|| format!("no clock period configured for design '{}'", tuple.design))?;

    let test = load_qor_report(Path::new(summary_test), sink)?;
    let target = load_qor_report(Path::new(summary_target), sink)?;
    let opts = SlackOptions {
        require_reg2reg: config.run.require_reg2reg,
    };
    Ok(score_slack(&test, &target, period, &opts)?)
}
