//! Implementation of `tangle cycles <script>`.
//!
//! Executes an editing script silently, then reports every cycle in the
//! final sketch. Inline `cycles` markers in the script are ignored here —
//! only the final state matters.
//!
//! Exit codes: 0 = success (even when cycles exist), 1 = a step was rejected
//! or `--fail-on-cycles` was set and cycles were found, 2 = parse failure.
use std::io::Write as _;

use tangle_core::{Sketch, find_cycles};

use crate::cli::OutputFormat;
use crate::cmd::{apply_step, cycles_to_json, io_to_cli, write_cycles_human};
use crate::error::CliError;
use crate::script::parse_script;

/// Runs the `cycles` command.
///
/// # Errors
///
/// Returns [`CliError`] for parse failures, rejected steps, stdout write
/// failures, and — when `fail_on_cycles` is set — a non-empty report.
pub fn run(content: &str, format: &OutputFormat, fail_on_cycles: bool) -> Result<(), CliError> {
    let steps = parse_script(content)?;

    let mut sketch = Sketch::new();
    for step in &steps {
        apply_step(&mut sketch, step)?;
    }

    let cycles = find_cycles(&sketch);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => {
            write_cycles_human(&mut out, &cycles).map_err(|e| io_to_cli(&e))?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", cycles_to_json(&cycles)).map_err(|e| io_to_cli(&e))?;
        }
    }

    if fail_on_cycles && !cycles.is_empty() {
        return Err(CliError::CyclesFound {
            count: cycles.len(),
        });
    }
    Ok(())
}
