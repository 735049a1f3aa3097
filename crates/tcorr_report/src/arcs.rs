//! The keyed arc/endpoint delay map produced by the native comparison tool.
//!
//! One JSON object maps entity ids to entries pairing a `key` side (the tool
//! under test) with a `value` side (the golden reference). Delay fields come
//! in two flavors: a plain `delay`, always present, and optional
//! `delay_r`/`delay_f` when the producing run reported transition polarity.
//! Everything else (slack, fanout, pins) is best-effort diagnostic payload.

use crate::error::ReportError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// A parsed delay map: entity id → comparison entry, ordered by id.
pub type ArcMap = BTreeMap<String, RawArcEntry>;

/// One entry of the delay map: a matched arc or endpoint with both sides.
#[derive(Debug, Clone, Deserialize)]
pub struct RawArcEntry {
    /// The arc type tag, e.g. `"net arc"`, `"cell arc"`, `"endpoint"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The side under test.
    pub key: RawArcSide,
    /// The golden reference side.
    pub value: RawArcSide,
    /// Hierarchical name of the driving pin, when known.
    #[serde(default)]
    pub from: Option<String>,
    /// Hierarchical name of the driven pin, when known.
    #[serde(default)]
    pub to: Option<String>,
    /// Precomputed key-minus-value delay difference, when the producing tool
    /// emitted one.
    #[serde(default)]
    pub delta_delay: Option<f64>,
}

impl RawArcEntry {
    /// The signed delay difference between the two sides.
    ///
    /// Uses the precomputed `delta_delay` when present, otherwise the
    /// difference of the scalar delays.
    pub fn delta(&self) -> f64 {
        self.delta_delay
            .unwrap_or(self.key.delay - self.value.delay)
    }
}

/// One side of a comparison entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawArcSide {
    /// Arc delay in nanoseconds.
    pub delay: f64,
    /// Rising-transition delay, when the run split by polarity.
    #[serde(default)]
    pub delay_r: Option<f64>,
    /// Falling-transition delay, when the run split by polarity.
    #[serde(default)]
    pub delay_f: Option<f64>,
    /// Endpoint slack in nanoseconds.
    #[serde(default)]
    pub slack: Option<f64>,
    /// Routed length of the arc's net.
    #[serde(default)]
    pub length: Option<f64>,
    /// Fanout of the driving net.
    #[serde(default)]
    pub fanout: Option<u32>,
    /// Pins along the arc, in traversal order.
    #[serde(default)]
    pub pins: Vec<RawPin>,
}

/// Diagnostic payload for one pin along an arc.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPin {
    /// Transition time at the pin.
    #[serde(default)]
    pub trans: Option<f64>,
    /// Capacitance at the pin.
    #[serde(default)]
    pub cap: Option<f64>,
    /// Placement location, when known.
    #[serde(default)]
    pub location: Option<PinLocation>,
    /// Library cell of the pin's instance.
    #[serde(default)]
    pub cell: Option<String>,
    /// Transition polarity at the pin (`true` = rise).
    #[serde(default)]
    pub rf: Option<bool>,
    /// Incremental delay contributed at this pin.
    #[serde(default)]
    pub incr_delay: Option<f64>,
}

/// A pin location: either placed coordinates or an opaque location string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PinLocation {
    /// Placed `(x, y)` coordinates.
    Coords(f64, f64),
    /// An opaque location description.
    Text(String),
}

// Coordinate pairs print as "(x, y)", opaque strings verbatim, matching the
// historical outlier CSV formatting.
impl fmt::Display for PinLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinLocation::Coords(x, y) => write!(f, "({x}, {y})"),
            PinLocation::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Loads a delay map from a JSON file.
pub fn load_arc_map(path: &Path) -> Result<ArcMap, ReportError> {
    let display = path.display().to_string();
    let content = crate::reader::read_report(path)?;
    serde_json::from_str(&content).map_err(|e| ReportError::Json {
        path: display,
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = r#"{
        "u_core/alu/add_12/Y": {
            "type": "cell arc",
            "from": "u_core/alu/add_12/A",
            "to": "u_core/alu/add_12/Y",
            "delta_delay": 0.013,
            "key": {
                "delay": 0.051,
                "slack": -0.2,
                "fanout": 3,
                "pins": [
                    {"trans": 0.02, "cap": 0.001, "location": [10.5, 22.0], "cell": "AND2_X1", "rf": true, "incr_delay": 0.01},
                    {"location": "unplaced"}
                ]
            },
            "value": {"delay": 0.038}
        }
    }"#;

    #[test]
    fn parses_full_entry() {
        let map: ArcMap = serde_json::from_str(ENTRY).unwrap();
        let entry = &map["u_core/alu/add_12/Y"];
        assert_eq!(entry.kind, "cell arc");
        assert_eq!(entry.key.delay, 0.051);
        assert_eq!(entry.key.fanout, Some(3));
        assert_eq!(entry.key.pins.len(), 2);
        assert_eq!(
            entry.key.pins[0].location,
            Some(PinLocation::Coords(10.5, 22.0))
        );
        assert_eq!(
            entry.key.pins[1].location,
            Some(PinLocation::Text("unplaced".to_string()))
        );
        assert_eq!(entry.value.delay, 0.038);
    }

    #[test]
    fn delta_prefers_precomputed() {
        let map: ArcMap = serde_json::from_str(ENTRY).unwrap();
        assert_eq!(map["u_core/alu/add_12/Y"].delta(), 0.013);
    }

    #[test]
    fn delta_falls_back_to_difference() {
        let json = r#"{"a": {"type": "net arc", "key": {"delay": 0.5}, "value": {"delay": 0.3}}}"#;
        let map: ArcMap = serde_json::from_str(json).unwrap();
        let delta = map["a"].delta();
        assert!((delta - 0.2).abs() < 1e-12);
    }

    #[test]
    fn location_display() {
        assert_eq!(format!("{}", PinLocation::Coords(1.0, 2.5)), "(1, 2.5)");
        assert_eq!(
            format!("{}", PinLocation::Text("unplaced".to_string())),
            "unplaced"
        );
    }

    #[test]
    fn load_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arcs.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_arc_map(&path).unwrap_err();
        assert!(matches!(err, ReportError::Json { .. }));
    }
}
