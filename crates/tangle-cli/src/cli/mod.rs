//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`]. This avoids stringly-typed handling of the stdin
/// sentinel throughout the codebase.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable line output (default).
    Human,
    /// Structured JSON output.
    Json,
}

/// The `tangle` binary: build a multigraph sketch from an editing script and
/// report its cycles.
#[derive(Parser)]
#[command(
    name = "tangle",
    about = "Multigraph sketch editing and cycle reporting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// All top-level subcommands exposed by the `tangle` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Execute an editing script, echoing each change to the sketch.
    Run {
        /// Path to a script file, or `-` for stdin.
        #[arg(value_name = "SCRIPT")]
        script: PathOrStdin,
        /// Output format: human (default) or json.
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
        /// Suppress per-change echo lines; only errors and inline cycle
        /// reports are printed.
        #[arg(long)]
        quiet: bool,
    },

    /// Execute an editing script and report every cycle in the final sketch.
    Cycles {
        /// Path to a script file, or `-` for stdin.
        #[arg(value_name = "SCRIPT")]
        script: PathOrStdin,
        /// Output format: human (default) or json.
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
        /// Exit with status 1 when any cycle is found.
        #[arg(long)]
        fail_on_cycles: bool,
    },

    /// Print summary statistics for the sketch an editing script builds.
    Inspect {
        /// Path to a script file, or `-` for stdin.
        #[arg(value_name = "SCRIPT")]
        script: PathOrStdin,
        /// Output format: human (default) or json.
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Print the tangle-core library version.
    Version,
}
