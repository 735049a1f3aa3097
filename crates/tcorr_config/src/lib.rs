//! Run configuration for the tcorr toolkit, parsed from `tcorr.toml`.
//!
//! A run configuration names the comparison tuples (test vs. target result
//! sets), the per-design clock periods used by slack scoring, and the knobs
//! of the correlation engine (canonicalization depth, delay sanity bound,
//! outlier cap, reg2reg strictness).

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{RunConfig, RunSettings, TupleSpec};
