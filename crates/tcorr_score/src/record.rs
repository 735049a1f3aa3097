//! Typed comparison records built from the raw delay map.
//!
//! The raw map mixes scalar delays and rise/fall pairs depending on how the
//! producing run was configured. A capability probe on the first entry picks
//! the [`CorrelationPolicy`] once; every record is then built with a fixed
//! [`DelayValue`] shape so downstream arithmetic never re-probes.

use crate::error::ScoreError;
use serde::Serialize;
use tcorr_common::{DelayShape, DelayValue, ShapeError};
use tcorr_diagnostics::{Diagnostic, DiagnosticSink};
use tcorr_report::{ArcMap, RawArcSide};

/// The kind of timing entity a record describes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum ArcKind {
    /// An interconnect (net) delay arc.
    NetArc,
    /// A cell (gate) delay arc.
    CellArc,
    /// A path endpoint.
    Endpoint,
    /// An arc imported from a CSV source.
    CsvArc,
}

impl ArcKind {
    /// Maps the delay map's string tag to a kind.
    ///
    /// Unrecognized tags land in the cell bucket, which is also where the
    /// correlation point assembly puts every non-net kind.
    pub fn from_tag(tag: &str) -> ArcKind {
        match tag {
            "net arc" => ArcKind::NetArc,
            "endpoint" | "endpoint_grp" => ArcKind::Endpoint,
            "csv arc" | "csv" => ArcKind::CsvArc,
            _ => ArcKind::CellArc,
        }
    }

    /// Returns `true` for net arcs.
    pub fn is_net(self) -> bool {
        self == ArcKind::NetArc
    }
}

/// One typed delay comparison: the test-side and golden-side delay of a
/// single arc or endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct ArcRecord {
    /// The entity id from the delay map.
    pub id: String,
    /// What kind of entity this is.
    pub kind: ArcKind,
    /// Delay reported by the tool under test.
    pub key_delay: DelayValue,
    /// Delay reported by the golden tool.
    pub value_delay: DelayValue,
    /// Hierarchical name of the driving pin, when known.
    pub from: Option<String>,
    /// Hierarchical name of the driven pin, when known.
    pub to: Option<String>,
    /// Aggregation weight.
    pub weight: u32,
}

impl ArcRecord {
    /// Creates a record, enforcing that both sides have the same shape.
    pub fn new(
        id: impl Into<String>,
        kind: ArcKind,
        key_delay: DelayValue,
        value_delay: DelayValue,
    ) -> Result<Self, ShapeError> {
        if key_delay.shape() != value_delay.shape() {
            return Err(ShapeError {
                left: key_delay.shape(),
                right: value_delay.shape(),
            });
        }
        Ok(Self {
            id: id.into(),
            kind,
            key_delay,
            value_delay,
            from: None,
            to: None,
            weight: 1,
        })
    }
}

/// How delay samples are extracted from the raw map, chosen once per input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CorrelationPolicy {
    /// One scalar (key, value) sample per entry.
    RawPair,
    /// Two samples per entry, one per transition polarity.
    RiseFallSplit,
}

impl CorrelationPolicy {
    /// Capability probe: rise/fall splitting is in effect when the first
    /// entry's test side carries both `delay_r` and `delay_f`.
    pub fn detect(raw: &ArcMap) -> CorrelationPolicy {
        match raw.values().next() {
            Some(entry) if entry.key.delay_r.is_some() && entry.key.delay_f.is_some() => {
                CorrelationPolicy::RiseFallSplit
            }
            _ => CorrelationPolicy::RawPair,
        }
    }
}

/// Knobs of the record builder.
#[derive(Clone, Copy, Debug)]
pub struct BuildOptions {
    /// Upper sanity bound on the scalar delay of either side. Entries above
    /// it are excluded from correlation: delays that large in a
    /// nanosecond-denominated map indicate a unit mismatch upstream, and a
    /// handful of such points would dominate the regression.
    pub max_delay_ns: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { max_delay_ns: 1.0 }
    }
}

/// The builder's output: typed records plus what was decided and dropped.
#[derive(Debug)]
pub struct BuiltRecords {
    /// Typed comparison records, ordered by entity id.
    pub records: Vec<ArcRecord>,
    /// The policy chosen by the capability probe.
    pub policy: CorrelationPolicy,
    /// Number of entries excluded by the delay sanity bound.
    pub dropped: usize,
}

/// Builds typed records from a raw delay map.
///
/// Probes the correlation policy, applies the delay sanity bound, and
/// resolves each entry's delays into a fixed-shape [`DelayValue`] pair. An
/// entry whose shape contradicts the probed policy fails the whole build —
/// the map was produced by a single run and cannot legitimately mix shapes.
pub fn build_records(
    raw: &ArcMap,
    opts: &BuildOptions,
    sink: &DiagnosticSink,
) -> Result<BuiltRecords, ScoreError> {
    let policy = CorrelationPolicy::detect(raw);
    let mut records = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;

    for (id, entry) in raw {
        if entry.key.delay > opts.max_delay_ns || entry.value.delay > opts.max_delay_ns {
            dropped += 1;
            continue;
        }

        let key_delay = side_delay(&entry.key, policy)?;
        let value_delay = side_delay(&entry.value, policy)?;
        let mut record =
            ArcRecord::new(id.clone(), ArcKind::from_tag(&entry.kind), key_delay, value_delay)?;
        record.from = entry.from.clone();
        record.to = entry.to.clone();
        records.push(record);
    }

    if dropped > 0 {
        sink.emit(Diagnostic::note(format!(
            "excluded {dropped} entr{} above the {} ns delay bound",
            if dropped == 1 { "y" } else { "ies" },
            opts.max_delay_ns
        )));
    }

    Ok(BuiltRecords {
        records,
        policy,
        dropped,
    })
}

/// Resolves one side's delay under the probed policy.
///
/// The shape error's `left` is the shape the probe established, `right` the
/// shape this side actually has.
fn side_delay(side: &RawArcSide, policy: CorrelationPolicy) -> Result<DelayValue, ScoreError> {
    match policy {
        CorrelationPolicy::RawPair => Ok(DelayValue::Scalar(side.delay)),
        CorrelationPolicy::RiseFallSplit => match (side.delay_r, side.delay_f) {
            (Some(rise), Some(fall)) => Ok(DelayValue::RiseFall { rise, fall }),
            _ => Err(ShapeError {
                left: DelayShape::RiseFall,
                right: DelayShape::Scalar,
            }
            .into()),
        },
    }
}

/// Builds endpoint records by matching the two scatter maps on name.
///
/// Names present on only one side are skipped; the correlation is defined on
/// the intersection.
pub fn endpoint_records(
    test: &std::collections::BTreeMap<String, f64>,
    target: &std::collections::BTreeMap<String, f64>,
) -> Vec<ArcRecord> {
    test.iter()
        .filter_map(|(name, test_value)| {
            let target_value = target.get(name)?;
            Some(ArcRecord {
                id: name.clone(),
                kind: ArcKind::Endpoint,
                key_delay: DelayValue::Scalar(*test_value),
                value_delay: DelayValue::Scalar(*target_value),
                from: None,
                to: None,
                weight: 1,
            })
        })
        .collect()
}
