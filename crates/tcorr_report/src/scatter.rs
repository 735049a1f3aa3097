//! Endpoint scatter files: one `<name> <value>` pair per line.

use crate::error::ReportError;
use std::collections::BTreeMap;
use std::path::Path;
use tcorr_diagnostics::{Diagnostic, DiagnosticSink};

/// Loads a scatter file into a name → value map.
///
/// Values are whitespace-separated; blank lines are skipped. Duplicate names
/// after the first occurrence are ignored with a warning, matching the
/// long-standing behavior of the comparison flow. A line without a numeric
/// second column is fatal for the file.
pub fn load_scatter(
    path: &Path,
    sink: &DiagnosticSink,
) -> Result<BTreeMap<String, f64>, ReportError> {
    let display = path.display().to_string();
    let content = crate::reader::read_report(path)?;

    let mut values = BTreeMap::new();
    for (index, line) in content.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            continue;
        };
        let value: f64 = tokens
            .next()
            .ok_or_else(|| ReportError::Malformed {
                path: display.clone(),
                line: index + 1,
                reason: format!("missing value for '{name}'"),
            })?
            .parse()
            .map_err(|_| ReportError::Malformed {
                path: display.clone(),
                line: index + 1,
                reason: format!("expected a numeric value for '{name}'"),
            })?;

        if values.contains_key(name) {
            sink.emit(
                Diagnostic::warning(format!("ignoring another occurrence of key '{name}'"))
                    .with_origin(&display),
            );
            continue;
        }
        values.insert(name.to_string(), value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_scatter(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter_0.txt");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn parses_pairs() {
        let (_dir, path) = write_scatter("u_core/r0/q -0.12\nu_core/r1/q 0.05\n");
        let sink = DiagnosticSink::new();
        let values = load_scatter(&path, &sink).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values["u_core/r0/q"], -0.12);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn skips_blank_lines() {
        let (_dir, path) = write_scatter("a 1.0\n\n   \nb 2.0\n");
        let sink = DiagnosticSink::new();
        let values = load_scatter(&path, &sink).unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn first_duplicate_wins_with_warning() {
        let (_dir, path) = write_scatter("a 1.0\na 9.0\n");
        let sink = DiagnosticSink::new();
        let values = load_scatter(&path, &sink).unwrap();
        assert_eq!(values["a"], 1.0);
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("'a'"));
    }

    #[test]
    fn rejects_missing_value() {
        let (_dir, path) = write_scatter("a 1.0\nlonely\n");
        let sink = DiagnosticSink::new();
        let err = load_scatter(&path, &sink).unwrap_err();
        assert!(matches!(err, ReportError::Malformed { line: 2, .. }));
    }

    #[test]
    fn rejects_non_numeric_value() {
        let (_dir, path) = write_scatter("a one\n");
        let sink = DiagnosticSink::new();
        let err = load_scatter(&path, &sink).unwrap_err();
        assert!(format!("{err}").contains("numeric"));
    }
}
