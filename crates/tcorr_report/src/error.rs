//! Error types for input ingestion.

/// Errors reading or decoding an input file.
///
/// Every variant carries the originating path: a comparison run reads many
/// files and a bare "invalid JSON" is not actionable.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The file could not be read (or decompressed).
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Path of the unreadable file.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file was not valid JSON of the expected shape.
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        /// Path of the malformed file.
        path: String,
        /// The underlying decode error.
        source: serde_json::Error,
    },

    /// A line of a structured text file could not be interpreted.
    #[error("malformed input in '{path}' at line {line}: {reason}")]
    Malformed {
        /// Path of the malformed file.
        path: String,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
}

impl ReportError {
    /// Creates an [`Io`](ReportError::Io) error for `path`.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_io() {
        let err = ReportError::io(
            "rpt/missing.rpt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(
            format!("{err}"),
            "failed to read 'rpt/missing.rpt': no such file"
        );
    }

    #[test]
    fn display_malformed() {
        let err = ReportError::Malformed {
            path: "s0.txt".to_string(),
            line: 7,
            reason: "expected a numeric value".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "malformed input in 's0.txt' at line 7: expected a numeric value"
        );
    }
}
