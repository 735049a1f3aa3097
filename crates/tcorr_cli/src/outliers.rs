//! `tcorr outliers` — standalone worst-N outlier extraction.

use std::path::Path;

use tcorr_report::load_arc_map;
use tcorr_score::rank_outliers;

use crate::{export, GlobalArgs};

/// Runs the `tcorr outliers` command.
pub fn run(
    arcs: &str,
    output: &str,
    top: Option<usize>,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let map = load_arc_map(Path::new(arcs))?;
    let report = rank_outliers(&map, top);
    export::write_outlier_csv(Path::new(output), &report)?;

    if !global.quiet {
        eprintln!(
            "   Kept {} entr{}: mean abs error {:.4} ns, max {:.4} ns, table in {output}",
            report.ranked.len(),
            if report.ranked.len() == 1 { "y" } else { "ies" },
            report.mean_abs_error,
            report.max_abs_error
        );
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_and_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let arcs = dir.path().join("arcs.json");
        std::fs::write(
            &arcs,
            r#"{
            "a": {"type": "net arc", "delta_delay": 0.1,
                  "key": {"delay": 0.4}, "value": {"delay": 0.3}},
            "b": {"type": "net arc", "delta_delay": -0.9,
                  "key": {"delay": 0.1}, "value": {"delay": 1.0}},
            "c": {"type": "net arc", "delta_delay": 0.3,
                  "key": {"delay": 0.5}, "value": {"delay": 0.2}}
        }"#,
        )
        .unwrap();
        let output = dir.path().join("filter.csv");

        let global = GlobalArgs {
            quiet: true,
            verbose: false,
        };
        let code = run(
            arcs.to_str().unwrap(),
            output.to_str().unwrap(),
            Some(2),
            &global,
        )
        .unwrap();
        assert_eq!(code, 0);

        let content = std::fs::read_to_string(&output).unwrap();
        // Header plus the two worst entries.
        assert_eq!(content.lines().count(), 3);
        assert!(content.lines().nth(1).unwrap().contains("-0.9000"));
    }

    #[test]
    fn missing_map_is_an_error() {
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
        };
        assert!(run("/nonexistent/arcs.json", "out.csv", None, &global).is_err());
    }
}
