//! QoR timing report parser.
//!
//! Extracts per-path-group timing metrics and the design-wide summary from a
//! QoR report. The layout handled here:
//!
//! ```text
//! Timing Path Group 'reg2reg' (max_delay/setup)
//! -----------------------------------------------
//!   Levels of Logic:              12
//!   Critical Path Length:         0.842
//!   Critical Path Slack:          -0.120
//!   Critical Path Clk Period:     1.000
//!   Total Negative Slack:         -3.400
//!   No. of Violating Paths:       57
//! -----------------------------------------------
//!
//! ...
//! Worst Negative Slack:  -0.120
//! Total Negative Slack:  -5.100
//! Number of Violating Paths: 80
//! The 100th Path Slack:  -0.020
//! ```
//!
//! The parser is line-based. Design-wide metric lines are only recognized
//! outside path-group sections; `Total Negative Slack` appears in both
//! places and must not be confused. Each group's metrics plus a synthetic
//! [`OVERALL_SUMMARY`] row (violations summed, logic levels and path length
//! maxed over the groups, clock period taken from the first group) form the
//! resulting [`TimingSummary`]. Unparsable metric values are reported as
//! warnings and default to zero.

use crate::error::ReportError;
use std::path::Path;
use tcorr_common::{TimingSummary, TimingSummaryRow, OVERALL_SUMMARY};
use tcorr_diagnostics::{Diagnostic, DiagnosticSink};

/// Loads and parses a QoR report file (optionally gzipped).
pub fn load_qor_report(path: &Path, sink: &DiagnosticSink) -> Result<TimingSummary, ReportError> {
    let content = crate::reader::read_report(path)?;
    Ok(parse_qor_report(
        &content,
        &path.display().to_string(),
        sink,
    ))
}

/// Parses QoR report text into a [`TimingSummary`].
///
/// `source` names the report in diagnostics (typically its path).
pub fn parse_qor_report(text: &str, source: &str, sink: &DiagnosticSink) -> TimingSummary {
    let mut summary = TimingSummary::new();
    let mut current: Option<GroupBuilder> = None;

    // Design-wide summary metrics, collected outside group sections.
    let mut overall_wns: Option<f64> = None;
    let mut overall_tns: Option<f64> = None;
    let mut overall_wns100: Option<f64> = None;
    let mut overall_violations: Option<u32> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(name) = parse_group_header(trimmed) {
            // A new header finalizes any group left open by a truncated report.
            if let Some(group) = current.take() {
                summary.push(group.finish(source, sink));
            }
            current = Some(GroupBuilder::new(name));
            continue;
        }

        if let Some(mut group) = current.take() {
            if is_separator(trimmed) {
                group.separators += 1;
                if group.separators == 2 {
                    summary.push(group.finish(source, sink));
                } else {
                    current = Some(group);
                }
                continue;
            }
            if group.separators == 1 {
                group.consume_field(trimmed, source, sink);
            }
            current = Some(group);
            continue;
        }

        // Outside any group: design-wide summary lines.
        if let Some(value) = metric_after(trimmed, "Worst Negative Slack", source, sink) {
            overall_wns = Some(value);
        } else if let Some(value) = metric_after(trimmed, "Total Negative Slack", source, sink) {
            overall_tns = Some(value);
        } else if let Some(value) = metric_after(trimmed, "The 100th Path Slack", source, sink) {
            overall_wns100 = Some(value);
        } else if let Some(value) = metric_after(trimmed, "Number of Violating Paths", source, sink)
        {
            overall_violations = Some(value as u32);
        }
    }

    // A report truncated inside a group still yields that group's row.
    if let Some(group) = current.take() {
        summary.push(group.finish(source, sink));
    }

    push_overall_row(
        &mut summary,
        overall_wns,
        overall_tns,
        overall_wns100,
        overall_violations,
        source,
        sink,
    );
    summary
}

/// Extracts the group label from a `Timing Path Group '<label>' (...)` line.
fn parse_group_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("Timing Path Group ")?;
    let rest = rest.strip_prefix('\'')?;
    let end = rest.find('\'')?;
    Some(&rest[..end])
}

/// Returns `true` for a dashed separator line.
fn is_separator(line: &str) -> bool {
    line.len() >= 2 && line.chars().all(|c| c == '-')
}

/// Parses the numeric value following `<prefix>...:` on a line.
///
/// Reports a warning when the prefix matches but the value does not parse;
/// returns `None` both then and when the prefix does not match.
fn metric_after(line: &str, prefix: &str, source: &str, sink: &DiagnosticSink) -> Option<f64> {
    if !line.starts_with(prefix) {
        return None;
    }
    let value = line.split(':').nth(1)?.split_whitespace().next()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            sink.emit(
                Diagnostic::warning(format!("unparsable value '{value}' for '{prefix}'"))
                    .with_origin(source),
            );
            None
        }
    }
}

/// Accumulates one path-group section.
struct GroupBuilder {
    name: String,
    separators: u8,
    logic_levels: Option<u32>,
    path_length: Option<f64>,
    wns: Option<f64>,
    clock_period: Option<f64>,
    tns: Option<f64>,
    violations: Option<u32>,
}

impl GroupBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            separators: 0,
            logic_levels: None,
            path_length: None,
            wns: None,
            clock_period: None,
            tns: None,
            violations: None,
        }
    }

    /// Interprets one content line of the group section.
    fn consume_field(&mut self, line: &str, source: &str, sink: &DiagnosticSink) {
        if let Some(v) = metric_after(line, "Levels of Logic", source, sink) {
            self.logic_levels = Some(v as u32);
        } else if let Some(v) = metric_after(line, "Critical Path Length", source, sink) {
            self.path_length = Some(v);
        } else if let Some(v) = metric_after(line, "Critical Path Slack", source, sink) {
            self.wns = Some(v);
        } else if let Some(v) = metric_after(line, "Critical Path Clk Period", source, sink) {
            self.clock_period = Some(v);
        } else if let Some(v) = metric_after(line, "Total Negative Slack", source, sink) {
            self.tns = Some(v);
        } else if let Some(v) = metric_after(line, "No. of Violating Paths", source, sink) {
            self.violations = Some(v as u32);
        }
    }

    fn finish(self, source: &str, sink: &DiagnosticSink) -> TimingSummaryRow {
        if self.wns.is_none() || self.tns.is_none() {
            sink.emit(
                Diagnostic::warning(format!(
                    "path group '{}' is missing slack metrics",
                    self.name
                ))
                .with_origin(source),
            );
        }
        TimingSummaryRow {
            path_group: self.name,
            wns_ns: self.wns.unwrap_or(0.0),
            tns_ns: self.tns.unwrap_or(0.0),
            wns100_ns: None,
            violations: self.violations.unwrap_or(0),
            logic_levels: self.logic_levels.unwrap_or(0),
            path_length_ns: self.path_length.unwrap_or(0.0),
            clock_period_ns: self.clock_period,
        }
    }
}

/// Appends the synthetic design-wide row aggregated over the group rows.
fn push_overall_row(
    summary: &mut TimingSummary,
    wns: Option<f64>,
    tns: Option<f64>,
    wns100: Option<f64>,
    violations: Option<u32>,
    source: &str,
    sink: &DiagnosticSink,
) {
    let (Some(wns), Some(tns)) = (wns, tns) else {
        sink.emit(
            Diagnostic::warning("report has no design-wide summary metrics").with_origin(source),
        );
        return;
    };

    let groups = summary.rows();
    let summed_violations: u32 = groups.iter().map(|r| r.violations).sum();
    let row = TimingSummaryRow {
        path_group: OVERALL_SUMMARY.to_string(),
        wns_ns: wns,
        tns_ns: tns,
        wns100_ns: wns100,
        // Group rows are authoritative for the violation count; the
        // design-wide line only stands in when the report has no groups.
        violations: if groups.is_empty() {
            violations.unwrap_or(0)
        } else {
            summed_violations
        },
        logic_levels: groups.iter().map(|r| r.logic_levels).max().unwrap_or(0),
        path_length_ns: groups
            .iter()
            .map(|r| r.path_length_ns)
            .fold(0.0, f64::max),
        clock_period_ns: groups.iter().find_map(|r| r.clock_period_ns),
    };
    summary.push(row);
}
