//! Ingestion of the external container formats consumed by tcorr.
//!
//! Three inputs feed a comparison tuple:
//!
//! - [`arcs`] — the keyed per-arc delay map (JSON) produced by the native
//!   comparison tool, one entry per matched timing arc or endpoint
//! - [`scatter`] — per-endpoint `<name> <value>` scatter text files, one per
//!   side of the comparison
//! - [`qor`] — QoR timing reports, parsed into path-group summary tables
//!
//! Reports may be gzip-compressed (`*.rpt.gz`); [`reader`] handles
//! decompression transparently. Malformed files are fatal for their input and
//! reported with the originating path; recoverable oddities (duplicate
//! scatter keys, unparsable report fields) become warnings in the caller's
//! diagnostic sink.

#![warn(missing_docs)]

pub mod arcs;
pub mod error;
pub mod qor;
pub mod reader;
pub mod scatter;

pub use arcs::{load_arc_map, ArcMap, PinLocation, RawArcEntry, RawArcSide, RawPin};
pub use error::ReportError;
pub use qor::{load_qor_report, parse_qor_report};
pub use reader::read_report;
pub use scatter::load_scatter;
