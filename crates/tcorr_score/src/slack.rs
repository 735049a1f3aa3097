//! Slack-accuracy sub-scores from two timing-summary tables.
//!
//! Five metrics compare the test table against the target table: WNS, the
//! 100th-worst-path slack, and TNS from the design-wide summary row, plus
//! WNS and TNS from the `reg2reg` path group. Only violations matter —
//! every slack is clipped to the non-positive range before comparison, so
//! positive slack on both sides scores a clean 100.
//!
//! WNS-like metrics score linearly in the mismatch, normalized by the clock
//! period. TNS aggregates many paths and spans orders of magnitude across
//! designs, so its mismatch is compared in log2 space and scaled down by 10×
//! before the same linear transform — without the compression, large-design
//! TNS differences would dominate the composite score.

use crate::error::ScoreError;
use serde::Serialize;
use tcorr_common::{TimingSummary, OVERALL_SUMMARY, REG2REG};

/// One compared metric: both raw inputs and the resulting score.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct MetricScore {
    /// The test tool's raw (unclipped) value.
    pub test: f64,
    /// The golden tool's raw (unclipped) value.
    pub target: f64,
    /// The accuracy score; 100 means the clipped values agree exactly.
    pub score: f64,
}

/// The five slack-accuracy sub-scores of one comparison.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SlackScores {
    /// Design-wide worst negative slack.
    pub wns: MetricScore,
    /// Design-wide 100th-worst-path slack.
    pub wns100: MetricScore,
    /// Design-wide total negative slack (log-scaled score).
    pub tns: MetricScore,
    /// Register-to-register worst negative slack.
    pub r2r_wns: MetricScore,
    /// Register-to-register total negative slack (log-scaled score).
    pub r2r_tns: MetricScore,
}

/// Knobs of the slack scorer.
#[derive(Clone, Copy, Debug)]
pub struct SlackOptions {
    /// When `true`, a table without a `reg2reg` row fails with
    /// [`ScoreError::MissingPathGroup`]; when `false`, the missing row's
    /// metrics degrade to 0.0 (no violations).
    pub require_reg2reg: bool,
}

impl Default for SlackOptions {
    fn default() -> Self {
        Self {
            require_reg2reg: true,
        }
    }
}

/// Scores the test summary against the target summary.
///
/// `period` is the design's clock period in nanoseconds and must be
/// positive. Both tables must carry an [`OVERALL_SUMMARY`] row; the
/// `reg2reg` requirement is governed by `opts`.
pub fn score_slack(
    test: &TimingSummary,
    target: &TimingSummary,
    period: f64,
    opts: &SlackOptions,
) -> Result<SlackScores, ScoreError> {
    if period <= 0.0 {
        return Err(ScoreError::degenerate(format!(
            "non-positive clock period {period}"
        )));
    }

    let test_overall = overall_row(test, "test")?;
    let target_overall = overall_row(target, "target")?;
    let (test_r2r_wns, test_r2r_tns) = reg2reg_metrics(test, "test", opts)?;
    let (target_r2r_wns, target_r2r_tns) = reg2reg_metrics(target, "target", opts)?;

    let test_wns100 = test_overall.wns100_ns.unwrap_or(0.0);
    let target_wns100 = target_overall.wns100_ns.unwrap_or(0.0);

    Ok(SlackScores {
        wns: linear_metric(test_overall.wns_ns, target_overall.wns_ns, period),
        wns100: linear_metric(test_wns100, target_wns100, period),
        tns: log_metric(test_overall.tns_ns, target_overall.tns_ns, period),
        r2r_wns: linear_metric(test_r2r_wns, target_r2r_wns, period),
        r2r_tns: log_metric(test_r2r_tns, target_r2r_tns, period),
    })
}

fn overall_row<'a>(
    summary: &'a TimingSummary,
    table: &str,
) -> Result<&'a tcorr_common::TimingSummaryRow, ScoreError> {
    summary
        .row(OVERALL_SUMMARY)
        .ok_or_else(|| ScoreError::MissingPathGroup {
            table: table.to_string(),
            group: OVERALL_SUMMARY.to_string(),
        })
}

fn reg2reg_metrics(
    summary: &TimingSummary,
    table: &str,
    opts: &SlackOptions,
) -> Result<(f64, f64), ScoreError> {
    match summary.row(REG2REG) {
        Some(row) => Ok((row.wns_ns, row.tns_ns)),
        None if opts.require_reg2reg => Err(ScoreError::MissingPathGroup {
            table: table.to_string(),
            group: REG2REG.to_string(),
        }),
        None => Ok((0.0, 0.0)),
    }
}

/// Clips a slack to the non-positive range: only violations are scored.
fn clip(slack: f64) -> f64 {
    slack.min(0.0)
}

/// `100 − 100·|test − target| / |period|` over clipped values.
fn linear_metric(test: f64, target: f64, period: f64) -> MetricScore {
    let mismatch = (clip(test) - clip(target)).abs() / period.abs();
    MetricScore {
        test,
        target,
        score: 100.0 - 100.0 * mismatch,
    }
}

/// The log-compressed variant for cumulative metrics.
///
/// `100·period − clipped` is at least `100·period`, so the logs are taken of
/// strictly positive arguments.
fn log_metric(test: f64, target: f64, period: f64) -> MetricScore {
    let test_log = (100.0 * period - clip(test)).log2().abs();
    let target_log = (100.0 * period - clip(target)).log2().abs();
    let mismatch = (test_log - target_log).abs() * 0.1;
    MetricScore {
        test,
        target,
        score: 100.0 - 100.0 * mismatch,
    }
}
