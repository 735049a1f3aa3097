//! Timing correlation and regression scoring engine.
//!
//! Reduces a keyed map of per-arc/per-endpoint delay comparisons and a pair
//! of timing-summary tables into correlation-quality metrics, slack-accuracy
//! sub-scores, and one composite fitness score. The engine is pure: it
//! consumes fully materialized inputs, performs no I/O, and reports
//! recoverable oddities through a caller-owned diagnostic sink.
//!
//! # Usage
//!
//! ```ignore
//! use tcorr_score::{build_records, fit_line, points_from_records, BuildOptions};
//!
//! let built = build_records(&arc_map, &BuildOptions::default(), &sink)?;
//! let (xs, ys) = points_from_records(&built.records);
//! let fit = fit_line(&xs, &ys)?;
//! println!("arc r2 = {:.4}, pearson = {:.4}", fit.r_squared, fit.pearson_r);
//! ```
//!
//! # Architecture
//!
//! - [`canon`] — hierarchical name canonicalization and group keys
//! - [`record`] — typed comparison records + correlation-policy probe
//! - [`group`] — grouping and averaging by canonical name
//! - [`regression`] — degree-1 fit, R², and Pearson correlation
//! - [`slack`] — the five slack-accuracy sub-scores
//! - [`outlier`] — worst-N discrepancy ranking with placement diagnostics
//! - [`composite`] — the calibrated composite fitness score
//! - [`error`] — the engine's error taxonomy

#![warn(missing_docs)]

pub mod canon;
pub mod composite;
pub mod error;
pub mod group;
pub mod outlier;
pub mod record;
pub mod regression;
pub mod slack;

pub use canon::{arc_group_key, canonical_name, ShrinkDepth};
pub use composite::{compose, CompositeInputs};
pub use error::ScoreError;
pub use group::{average, group_arcs, group_endpoints, GroupedRecord};
pub use outlier::{rank_outliers, OutlierEntry, OutlierReport, UNAVAILABLE};
pub use record::{
    build_records, endpoint_records, ArcKind, ArcRecord, BuildOptions, BuiltRecords,
    CorrelationPolicy,
};
pub use regression::{fit_line, points_from_groups, points_from_records, RegressionFit};
pub use slack::{score_slack, MetricScore, SlackOptions, SlackScores};
