//! Report file reading with transparent gzip decompression.

use crate::error::ReportError;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads a report file into a string, decompressing `*.gz` files.
///
/// Signoff flows commonly archive reports compressed; the original inputs
/// this tool consumes arrive as both `*.rpt` and `*.rpt.gz`.
pub fn read_report(path: &Path) -> Result<String, ReportError> {
    let display = path.display().to_string();
    let mut content = String::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        let file = File::open(path).map_err(|e| ReportError::io(&display, e))?;
        GzDecoder::new(file)
            .read_to_string(&mut content)
            .map_err(|e| ReportError::io(&display, e))?;
    } else {
        let mut file = File::open(path).map_err(|e| ReportError::io(&display, e))?;
        file.read_to_string(&mut content)
            .map_err(|e| ReportError::io(&display, e))?;
    }
    Ok(content)
}
