//! First-degree regression and goodness-of-fit metrics.
//!
//! Two numbers summarize how well the test tool tracks the golden tool over
//! a point set:
//!
//! - `r_squared` — the coefficient of determination of using x *directly* as
//!   the prediction of y (not of the fitted line). This measures raw
//!   agreement: systematic offset or gain error drives it down even when the
//!   points lie on a perfect non-identity line. It can be negative.
//! - `pearson_r` — the linear correlation of x and y, blind to offset/gain.
//!
//! The fitted line itself (slope/intercept) is reported for downstream
//! consumers plotting or debugging a comparison.

use crate::error::ScoreError;
use crate::group::GroupedRecord;
use crate::record::ArcRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of fitting one point set.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RegressionFit {
    /// Slope of the least-squares line y ≈ a·x + b.
    pub slope: f64,
    /// Intercept of the least-squares line.
    pub intercept: f64,
    /// Coefficient of determination of x as the direct predictor of y.
    /// At most 1; negative when x predicts y worse than y's mean does.
    pub r_squared: f64,
    /// Pearson linear correlation coefficient of x and y, in [-1, 1].
    pub pearson_r: f64,
    /// Number of points in the fit.
    pub points: usize,
}

/// Fits a degree-1 least-squares line and computes both fit metrics.
///
/// Fails with [`ScoreError::DegenerateInput`] on fewer than two points or
/// zero variance on either axis — the metrics are undefined there and NaN
/// must not leak into downstream scoring.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Result<RegressionFit, ScoreError> {
    if xs.len() != ys.len() {
        return Err(ScoreError::degenerate(format!(
            "sample length mismatch: {} xs vs {} ys",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(ScoreError::degenerate(format!(
            "{} sample(s); a regression needs at least 2",
            xs.len()
        )));
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov = 0.0;
    let mut ss_res = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        var_x += dx * dx;
        var_y += dy * dy;
        cov += dx * dy;
        ss_res += (y - x) * (y - x);
    }

    if var_x == 0.0 {
        return Err(ScoreError::degenerate("zero variance in x samples"));
    }
    if var_y == 0.0 {
        return Err(ScoreError::degenerate("zero variance in y samples"));
    }

    let slope = cov / var_x;
    Ok(RegressionFit {
        slope,
        intercept: mean_y - slope * mean_x,
        r_squared: 1.0 - ss_res / var_y,
        pearson_r: (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0),
        points: xs.len(),
    })
}

/// Assembles the (x, y) point set of a record slice.
///
/// Cell-bucket points (every non-net kind) come first, net-arc points after,
/// matching the order the point set has always been assembled in. A
/// rise/fall record contributes two points, rise first.
pub fn points_from_records(records: &[ArcRecord]) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for net_pass in [false, true] {
        for record in records {
            if record.kind.is_net() != net_pass {
                continue;
            }
            push_pair(&mut xs, &mut ys, record);
        }
    }
    (xs, ys)
}

/// Assembles the (x, y) point set of grouped (or averaged) buckets.
pub fn points_from_groups(grouped: &BTreeMap<String, GroupedRecord>) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for net_pass in [false, true] {
        for bucket in grouped.values() {
            if bucket.kind.is_net() != net_pass {
                continue;
            }
            for (x, y) in bucket
                .key_sum
                .components()
                .into_iter()
                .zip(bucket.value_sum.components())
            {
                xs.push(x);
                ys.push(y);
            }
        }
    }
    (xs, ys)
}

fn push_pair(xs: &mut Vec<f64>, ys: &mut Vec<f64>, record: &ArcRecord) {
    for (x, y) in record
        .key_delay
        .components()
        .into_iter()
        .zip(record.value_delay.components())
    {
        xs.push(x);
        ys.push(y);
    }
}
