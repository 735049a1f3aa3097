//! Plain-text diagnostic rendering with a severity threshold.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Renders diagnostics as single lines, filtered by a minimum severity.
///
/// Produces output like:
/// ```text
/// warning: ignoring another occurrence of key 'u_core/reg_bank_3/q' (scatter_0.txt)
/// ```
pub struct Renderer {
    /// Diagnostics below this severity are suppressed.
    pub min_severity: Severity,
}

impl Renderer {
    /// Creates a renderer with the given severity threshold.
    pub fn new(min_severity: Severity) -> Self {
        Self { min_severity }
    }

    /// Renders a diagnostic, or `None` if it falls below the threshold.
    pub fn render(&self, diag: &Diagnostic) -> Option<String> {
        if diag.severity < self.min_severity {
            return None;
        }
        match &diag.origin {
            Some(origin) => Some(format!("{}: {} ({origin})", diag.severity, diag.message)),
            None => Some(format!("{}: {}", diag.severity, diag.message)),
        }
    }
}
