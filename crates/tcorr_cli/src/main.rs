//! tcorr CLI — compare a fast timing tool against a golden signoff tool.
//!
//! Provides `tcorr score` for full batch scoring of the comparison tuples in
//! a `tcorr.toml` run configuration, and `tcorr outliers` for standalone
//! worst-N outlier extraction from a single delay map.

#![warn(missing_docs)]

mod export;
mod outliers;
mod pipeline;
mod score;

use std::process;

use clap::{Parser, Subcommand};
use tcorr_diagnostics::Severity;

/// tcorr — timing correlation and regression scoring.
#[derive(Parser, Debug)]
#[command(name = "tcorr", version, about = "Timing correlation scoring toolkit")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (note-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score every comparison tuple in a run configuration.
    Score {
        /// Path to the `tcorr.toml` run configuration.
        config: String,
    },
    /// Rank the worst delay discrepancies of one delay map.
    Outliers {
        /// Path to the keyed delay map (JSON).
        arcs: String,

        /// Output CSV path.
        #[arg(short, long)]
        output: String,

        /// Keep only the worst N entries.
        #[arg(long)]
        top: Option<usize>,
    },
}

/// Global flags shared by every subcommand.
#[derive(Clone, Copy, Debug)]
pub struct GlobalArgs {
    /// Suppress all output except errors.
    pub quiet: bool,
    /// Enable verbose output.
    pub verbose: bool,
}

impl GlobalArgs {
    /// The minimum diagnostic severity to render.
    pub fn min_severity(&self) -> Severity {
        if self.quiet {
            Severity::Error
        } else if self.verbose {
            Severity::Note
        } else {
            Severity::Warning
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    let result = match &cli.command {
        Command::Score { config } => score::run(config, &global),
        Command::Outliers { arcs, output, top } => outliers::run(arcs, output, *top, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_thresholds() {
        let quiet = GlobalArgs {
            quiet: true,
            verbose: false,
        };
        assert_eq!(quiet.min_severity(), Severity::Error);

        let verbose = GlobalArgs {
            quiet: false,
            verbose: true,
        };
        assert_eq!(verbose.min_severity(), Severity::Note);

        let default = GlobalArgs {
            quiet: false,
            verbose: false,
        };
        assert_eq!(default.min_severity(), Severity::Warning);
    }

    #[test]
    fn cli_parses_score_command() {
        let cli = Cli::parse_from(["tcorr", "score", "runs/tcorr.toml"]);
        assert!(matches!(cli.command, Command::Score { .. }));
        assert!(!cli.quiet);
    }

    #[test]
    fn cli_parses_outliers_command() {
        let cli = Cli::parse_from([
            "tcorr", "-q", "outliers", "arcs.json", "-o", "out.csv", "--top", "50",
        ]);
        assert!(cli.quiet);
        match cli.command {
            Command::Outliers { top, .. } => assert_eq!(top, Some(50)),
            _ => panic!("expected outliers command"),
        }
    }
}
