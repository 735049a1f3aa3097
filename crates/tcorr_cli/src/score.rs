//! `tcorr score` — full batch scoring of a run configuration.
//!
//! The pipeline per configuration:
//!
//! 1. Load and validate `tcorr.toml`
//! 2. Process every comparison tuple on the worker pool
//! 3. Render accumulated diagnostics at the requested severity
//! 4. Write the batch metrics table next to the per-tuple outlier tables
//! 5. Report per-tuple failures; exit nonzero if any tuple failed

use std::path::Path;

use tcorr_diagnostics::{DiagnosticSink, Renderer};

use crate::pipeline::{run_batch, TupleMetrics};
use crate::{export, GlobalArgs};

/// Runs the `tcorr score` command.
///
/// Returns exit code 0 when every tuple scored, 1 when any tuple failed.
pub fn run(config_path: &str, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config_path = Path::new(config_path);
    let config = tcorr_config::load_config(config_path)?;

    if !global.quiet {
        eprintln!(
            "   Scoring {} tuple(s) into {}",
            config.tuples.len(),
            config.run.output_dir
        );
    }

    let sink = DiagnosticSink::new();
    let outcomes = run_batch(&config, &sink).map_err(|e| e as Box<dyn std::error::Error>)?;

    // Diagnostics first, then the per-tuple failures.
    let renderer = Renderer::new(global.min_severity());
    for diag in sink.diagnostics() {
        if let Some(line) = renderer.render(&diag) {
            eprintln!("{line}");
        }
    }

    let mut failures = 0usize;
    let mut rows: Vec<TupleMetrics> = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(metrics) => rows.push(metrics),
            Err(err) => {
                failures += 1;
                eprintln!("error: tuple '{}' failed: {err}", outcome.name);
            }
        }
    }

    let table_path = Path::new(&config.run.output_dir).join(metrics_table_name(config_path));
    export::write_metrics_csv(&table_path, &rows)?;

    if !global.quiet {
        eprintln!(
            "   Result: {} scored, {} failed, metrics in {}",
            rows.len(),
            failures,
            table_path.display()
        );
    }

    Ok(if failures > 0 { 1 } else { 0 })
}

/// Names the metrics table after the configuration file: `<stem>_r2.csv`.
fn metrics_table_name(config_path: &Path) -> String {
    let stem = config_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("tcorr");
    format!("{stem}_r2.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_named_after_config_stem() {
        assert_eq!(
            metrics_table_name(Path::new("runs/night_flow.toml")),
            "night_flow_r2.csv"
        );
        assert_eq!(metrics_table_name(Path::new("tcorr.toml")), "tcorr_r2.csv");
    }
}
