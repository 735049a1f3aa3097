//! Error types of the scoring engine.

use tcorr_common::ShapeError;

/// Errors raised while scoring one comparison tuple.
///
/// Failures are isolated per tuple by the caller: one tuple failing with any
/// of these must not abort its siblings.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// The input cannot support the requested computation (too few samples,
    /// zero variance, non-positive clock period).
    #[error("degenerate input: {reason}")]
    DegenerateInput {
        /// Why the computation is undefined on this input.
        reason: String,
    },

    /// A summary table lacks a required path-group row.
    #[error("summary table '{table}' has no '{group}' path group")]
    MissingPathGroup {
        /// Which table (test or target) is incomplete.
        table: String,
        /// The missing path-group label.
        group: String,
    },

    /// Delay values of mismatched scalar/rise-fall shape were combined.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl ScoreError {
    /// Creates a [`DegenerateInput`](ScoreError::DegenerateInput) error.
    pub fn degenerate(reason: impl Into<String>) -> Self {
        ScoreError::DegenerateInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcorr_common::DelayShape;

    #[test]
    fn display_degenerate() {
        let err = ScoreError::degenerate("fewer than 2 samples");
        assert_eq!(format!("{err}"), "degenerate input: fewer than 2 samples");
    }

    #[test]
    fn display_missing_path_group() {
        let err = ScoreError::MissingPathGroup {
            table: "target".to_string(),
            group: "reg2reg".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "summary table 'target' has no 'reg2reg' path group"
        );
    }

    #[test]
    fn shape_error_converts() {
        let shape = ShapeError {
            left: DelayShape::Scalar,
            right: DelayShape::RiseFall,
        };
        let err: ScoreError = shape.into();
        assert!(format!("{err}").contains("mismatched delay shapes"));
    }
}
