//! CSV export of the metrics table and per-tuple outlier tables.
//!
//! Floats are written with four decimals, matching the precision the
//! downstream tracking sheets have always consumed. Fields containing
//! commas or quotes (pin locations print as `"(x, y)"`) are quoted.

use crate::pipeline::TupleMetrics;
use std::io::Write;
use std::path::Path;
use tcorr_score::OutlierReport;

/// Column headers of the metrics table, one row per tuple.
const METRICS_HEADER: &[&str] = &[
    "name",
    "num_arc",
    "num_arc_group",
    "arc_r2",
    "arc_pearson",
    "arc_group_r2",
    "arc_group_pearson",
    "num_end",
    "num_end_group",
    "end_r2",
    "end_pearson",
    "end_group_r2",
    "end_group_pearson",
    "mae",
    "max_error",
    "test_wns",
    "target_wns",
    "wns_score",
    "test_wns100",
    "target_wns100",
    "wns100_score",
    "test_tns",
    "target_tns",
    "tns_score",
    "test_r2r_wns",
    "target_r2r_wns",
    "r2r_wns_score",
    "test_r2r_tns",
    "target_r2r_tns",
    "r2r_tns_score",
    "score",
];

/// Column headers of the per-tuple outlier table.
const OUTLIER_HEADER: &[&str] = &[
    "from_pin",
    "to_pin",
    "Delay Diff (ns)",
    "key_from_location",
    "key_to_location",
    "value_from_location",
    "value_to_location",
    "key_driving_cell",
    "value_driving_cell",
];

/// Writes the batch metrics table.
///
/// Tuples without slack scoring leave the slack and composite columns empty.
pub fn write_metrics_csv(path: &Path, rows: &[TupleMetrics]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{}", METRICS_HEADER.join(","))?;
    for row in rows {
        let mut fields: Vec<String> = vec![
            field(&row.name),
            row.num_arc.to_string(),
            row.num_arc_group.to_string(),
            float(row.arc.r_squared),
            float(row.arc.pearson_r),
            float(row.arc_grouped.r_squared),
            float(row.arc_grouped.pearson_r),
            row.num_end.to_string(),
            row.num_end_group.to_string(),
            float(row.endpoint.r_squared),
            float(row.endpoint.pearson_r),
            float(row.endpoint_grouped.r_squared),
            float(row.endpoint_grouped.pearson_r),
            float(row.mean_abs_error),
            float(row.max_abs_error),
        ];
        match &row.slack {
            Some(slack) => {
                for metric in [
                    &slack.wns,
                    &slack.wns100,
                    &slack.tns,
                    &slack.r2r_wns,
                    &slack.r2r_tns,
                ] {
                    fields.push(float(metric.test));
                    fields.push(float(metric.target));
                    fields.push(float(metric.score));
                }
            }
            None => fields.extend(std::iter::repeat(String::new()).take(15)),
        }
        fields.push(row.composite.map(float).unwrap_or_default());
        writeln!(file, "{}", fields.join(","))?;
    }
    Ok(())
}

/// Writes one tuple's ranked outlier table.
pub fn write_outlier_csv(path: &Path, report: &OutlierReport) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{}", OUTLIER_HEADER.join(","))?;
    for entry in &report.ranked {
        let fields = [
            field(&entry.from),
            field(&entry.to),
            float(entry.delta_delay),
            field(&entry.key_from_location),
            field(&entry.key_to_location),
            field(&entry.value_from_location),
            field(&entry.value_to_location),
            field(&entry.key_driving_cell),
            field(&entry.value_driving_cell),
        ];
        writeln!(file, "{}", fields.join(","))?;
    }
    Ok(())
}

/// Formats a float with the table precision.
fn float(value: f64) -> String {
    format!("{value:.4}")
}

/// Quotes a field when it contains a comma or quote.
fn field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tcorr_score::rank_outliers;

    #[test]
    fn quotes_fields_with_commas() {
        assert_eq!(field("(1, 2)"), "\"(1, 2)\"");
        assert_eq!(field("plain"), "plain");
        assert_eq!(field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn float_precision() {
        assert_eq!(float(0.123456), "0.1235");
        assert_eq!(float(-0.9), "-0.9000");
    }

    #[test]
    fn outlier_csv_shape() {
        let map: BTreeMap<String, tcorr_report::RawArcEntry> = serde_json::from_str(
            r#"{
            "a": {"type": "net arc", "from": "u/a/y", "to": "u/b/a", "delta_delay": 0.5,
                  "key": {"delay": 0.1, "pins": [{"location": [1.0, 2.0], "cell": "BUF"}]},
                  "value": {"delay": 0.1}}
        }"#,
        )
        .unwrap();
        let report = rank_outliers(&map, None);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filter.csv");
        write_outlier_csv(&path, &report).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "from_pin,to_pin,Delay Diff (ns),key_from_location,key_to_location,\
             value_from_location,value_to_location,key_driving_cell,value_driving_cell"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("u/a/y,u/b/a,0.5000,\"(1, 2)\",\"(1, 2)\""));
        assert!(row.ends_with("BUF,N/A"));
    }
}
