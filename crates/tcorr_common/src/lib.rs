//! Shared foundational types for the tcorr timing-correlation toolkit.
//!
//! This crate provides the tagged delay value used throughout record building
//! and aggregation, and the timing-summary table types parsed from QoR
//! reports and consumed by the slack scorer.

#![warn(missing_docs)]

pub mod delay;
pub mod summary;

pub use delay::{DelayShape, DelayValue, ShapeError};
pub use summary::{TimingSummary, TimingSummaryRow, OVERALL_SUMMARY, REG2REG};
