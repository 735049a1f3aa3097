//! Grouping and averaging of comparison records by canonical name.
//!
//! Arcs group on the concatenation of their canonicalized from/to names,
//! endpoints on their canonicalized id alone. Sums are component-wise over
//! both sides' delay values; averaging divides by the member count while
//! preserving it, so group weights stay available to consumers.

use crate::canon::{arc_group_key, canonical_name, ShrinkDepth};
use crate::record::{ArcKind, ArcRecord};
use std::collections::BTreeMap;
use tcorr_common::{DelayValue, ShapeError};
use tcorr_diagnostics::{Diagnostic, DiagnosticSink};

/// One canonical bucket of records: component-wise delay sums and the
/// member count.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedRecord {
    /// Component-wise sum of the members' test-side delays.
    pub key_sum: DelayValue,
    /// Component-wise sum of the members' golden-side delays.
    pub value_sum: DelayValue,
    /// Total weight of the members (count for unit-weight records).
    pub count: u32,
    /// The kind tag carried into correlation point assembly.
    pub kind: ArcKind,
}

/// Groups arc records by canonicalized from/to name pair.
///
/// Records without both endpoint names cannot be grouped structurally and
/// are skipped with a warning.
pub fn group_arcs(
    records: &[ArcRecord],
    depth: ShrinkDepth,
    sink: &DiagnosticSink,
) -> Result<BTreeMap<String, GroupedRecord>, ShapeError> {
    let mut grouped = BTreeMap::new();
    for record in records {
        let (Some(from), Some(to)) = (&record.from, &record.to) else {
            sink.emit(Diagnostic::warning(format!(
                "arc '{}' has no from/to names; skipped in grouping",
                record.id
            )));
            continue;
        };
        let group_key = arc_group_key(from, to, depth);
        accumulate(&mut grouped, group_key, record, ArcKind::CellArc)?;
    }
    Ok(grouped)
}

/// Groups endpoint records by canonicalized endpoint name.
pub fn group_endpoints(
    records: &[ArcRecord],
    depth: ShrinkDepth,
) -> Result<BTreeMap<String, GroupedRecord>, ShapeError> {
    let mut grouped = BTreeMap::new();
    for record in records {
        let group_key = canonical_name(&record.id, depth);
        accumulate(&mut grouped, group_key, record, ArcKind::Endpoint)?;
    }
    Ok(grouped)
}

/// Adds one record into its bucket.
fn accumulate(
    grouped: &mut BTreeMap<String, GroupedRecord>,
    group_key: String,
    record: &ArcRecord,
    kind: ArcKind,
) -> Result<(), ShapeError> {
    let shape = record.key_delay.shape();
    let bucket = grouped.entry(group_key).or_insert_with(|| GroupedRecord {
        key_sum: DelayValue::zero(shape),
        value_sum: DelayValue::zero(shape),
        count: 0,
        kind,
    });
    bucket.key_sum = bucket.key_sum.checked_add(record.key_delay)?;
    bucket.value_sum = bucket.value_sum.checked_add(record.value_delay)?;
    bucket.count += record.weight;
    Ok(())
}

/// Divides every bucket's delay sums by its count, preserving the count.
pub fn average(grouped: &BTreeMap<String, GroupedRecord>) -> BTreeMap<String, GroupedRecord> {
    grouped
        .iter()
        .map(|(group_key, bucket)| {
            let divisor = f64::from(bucket.count);
            (
                group_key.clone(),
                GroupedRecord {
                    key_sum: bucket.key_sum.scaled_down(divisor),
                    value_sum: bucket.value_sum.scaled_down(divisor),
                    count: bucket.count,
                    kind: bucket.kind,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(id: &str, from: &str, to: &str, key: f64, value: f64) -> ArcRecord {
        let mut record = ArcRecord::new(
            id,
            ArcKind::CellArc,
            DelayValue::Scalar(key),
            DelayValue::Scalar(value),
        )
        .unwrap();
        record.from = Some(from.to_string());
        record.to = Some(to.to_string());
        record
    }

    fn endpoint(id: &str, key: f64, value: f64) -> ArcRecord {
        ArcRecord::new(
            id,
            ArcKind::Endpoint,
            DelayValue::Scalar(key),
            DelayValue::Scalar(value),
        )
        .unwrap()
    }

    #[test]
    fn groups_structural_twins_together() {
        let records = vec![
            arc("a", "u/lane_1/x", "u/lane_1/y", 0.1, 0.2),
            arc("b", "u/lane_2/x", "u/lane_2/y", 0.3, 0.4),
            arc("c", "u/other/x", "u/other/y", 0.5, 0.6),
        ];
        let sink = DiagnosticSink::new();
        let grouped = group_arcs(&records, ShrinkDepth::All, &sink).unwrap();
        assert_eq!(grouped.len(), 2);
        let twins = &grouped["u/lane_*/x-u/lane_*/y"];
        assert_eq!(twins.count, 2);
        assert_eq!(twins.key_sum, DelayValue::Scalar(0.4));
        assert_eq!(twins.value_sum, DelayValue::Scalar(0.6000000000000001));
    }

    #[test]
    fn mass_conservation() {
        let records = vec![
            arc("a", "u/r_1/q", "u/s_1/d", 0.10, 0.11),
            arc("b", "u/r_2/q", "u/s_2/d", 0.20, 0.22),
            arc("c", "u/r_3/q", "u/s_3/d", 0.30, 0.33),
        ];
        let sink = DiagnosticSink::new();
        let grouped = group_arcs(&records, ShrinkDepth::All, &sink).unwrap();
        assert_eq!(grouped.len(), 1);
        let bucket = grouped.values().next().unwrap();
        let key_total: f64 = records
            .iter()
            .map(|r| r.key_delay.components()[0])
            .sum();
        assert_eq!(bucket.key_sum, DelayValue::Scalar(key_total));
        assert_eq!(bucket.count, 3);
    }

    #[test]
    fn skips_arcs_without_endpoints_with_warning() {
        let mut nameless = endpoint("e", 0.1, 0.1);
        nameless.kind = ArcKind::CellArc;
        let sink = DiagnosticSink::new();
        let grouped = group_arcs(&[nameless], ShrinkDepth::All, &sink).unwrap();
        assert!(grouped.is_empty());
        assert_eq!(sink.diagnostics().len(), 1);
    }

    #[test]
    fn average_divides_by_count() {
        // Two rise/fall endpoint members summing to [3.0, 4.0] average to
        // [1.5, 2.0] with the count preserved.
        let a = ArcRecord::new(
            "u/r_1/q",
            ArcKind::Endpoint,
            DelayValue::RiseFall {
                rise: 1.0,
                fall: 1.5,
            },
            DelayValue::RiseFall {
                rise: 1.0,
                fall: 1.5,
            },
        )
        .unwrap();
        let b = ArcRecord::new(
            "u/r_2/q",
            ArcKind::Endpoint,
            DelayValue::RiseFall {
                rise: 2.0,
                fall: 2.5,
            },
            DelayValue::RiseFall {
                rise: 2.0,
                fall: 2.5,
            },
        )
        .unwrap();
        let grouped = group_endpoints(&[a, b], ShrinkDepth::All).unwrap();
        assert_eq!(grouped.len(), 1);
        let bucket = grouped.values().next().unwrap();
        assert_eq!(
            bucket.key_sum,
            DelayValue::RiseFall {
                rise: 3.0,
                fall: 4.0
            }
        );

        let averaged = average(&grouped);
        let bucket = averaged.values().next().unwrap();
        assert_eq!(
            bucket.key_sum,
            DelayValue::RiseFall {
                rise: 1.5,
                fall: 2.0
            }
        );
        assert_eq!(bucket.count, 2);
    }

    #[test]
    fn endpoint_grouping_uses_id() {
        let records = vec![
            endpoint("u/bank_0/r_3/q", -0.1, -0.2),
            endpoint("u/bank_1/r_7/q", -0.3, -0.4),
        ];
        let grouped = group_endpoints(&records, ShrinkDepth::All).unwrap();
        assert_eq!(grouped.len(), 1);
        assert!(grouped.contains_key("u/bank_*/r_*/q"));
    }
}
